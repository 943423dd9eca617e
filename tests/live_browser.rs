use certificate_harvester::{launch_headless_browser, BrowserSession, Config, PageContext};
use std::time::Duration;

#[tokio::test]
#[ignore] // 需要本机安装 Chrome / Chromium：cargo test -- --ignored
async fn test_launch_and_render_blank_page() {
    let _ = tracing_subscriber::fmt::try_init();

    let config = Config::from_env();
    let session = launch_headless_browser(&config)
        .await
        .expect("启动浏览器失败");

    let page = session.open_page().await.expect("创建页面失败");
    page.navigate("data:text/html,<h1 class='title'>ok</h1>")
        .await
        .expect("导航失败");
    page.wait_for("h1.title", Duration::from_secs(5))
        .await
        .expect("元素未出现");

    let text = page.read_property("h1.title", "innerText").await.unwrap();
    assert_eq!(text.as_deref(), Some("ok"));

    let pdf = page.render_pdf().await.expect("渲染失败");
    assert!(pdf.starts_with(b"%PDF"));

    page.close().await.unwrap();
    session.close().await.unwrap();
}
