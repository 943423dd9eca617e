//! JS 执行器 - 基础设施层
//!
//! 持有 page 资源，只暴露"执行 JS / 读取 DOM 属性"的能力

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::HarvestResult;

/// JS 执行器
///
/// 职责：
/// - 持有 Page 资源
/// - 暴露 eval() 能力
/// - 不认识证书 / 学生
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于导航、渲染等操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 交出 page（关闭页面时使用）
    pub fn into_page(self) -> Page {
        self.page
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> HarvestResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> HarvestResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 读取所有匹配元素的属性值
    ///
    /// 读取的是 DOM 属性而不是 HTML 特性，`href` / `src` 因此都是绝对地址
    pub async fn query_property_all(&self, selector: &str, property: &str) -> HarvestResult<Vec<String>> {
        let js_code = format!(
            r#"
            (() => {{
                return Array.from(document.querySelectorAll({selector}))
                    .map((el) => el[{property}])
                    .filter((v) => v !== undefined && v !== null)
                    .map((v) => String(v));
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
            property = serde_json::to_string(property)?,
        );
        self.eval_as(js_code).await
    }

    /// 读取第一个匹配元素的属性值
    pub async fn query_property(&self, selector: &str, property: &str) -> HarvestResult<Option<String>> {
        // 始终返回数组，避免 null 结果在 CDP 层被当作缺失值
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({selector});
                if (!el) return [];
                const v = el[{property}];
                return v === undefined || v === null ? [] : [String(v)];
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
            property = serde_json::to_string(property)?,
        );
        let values: Vec<String> = self.eval_as(js_code).await?;
        Ok(values.into_iter().next())
    }
}
