//! 交互式读取学生 R.A

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::{HarvestError, HarvestResult};

const PROMPT: &str = "Digite o R.A do usuário: ";

/// 从标准输入读取 R.A
pub async fn ask_student_id() -> HarvestResult<String> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(PROMPT.as_bytes())
        .await
        .map_err(|e| HarvestError::Input(e.to_string()))?;
    stdout
        .flush()
        .await
        .map_err(|e| HarvestError::Input(e.to_string()))?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .map_err(|e| HarvestError::Input(e.to_string()))?;

    validate_student_id(&line)
}

/// R.A 会作为目录名和文件名使用
pub fn validate_student_id(raw: &str) -> HarvestResult<String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(HarvestError::Input("R.A 不能为空".to_string()));
    }
    if id == "." || id == ".." || id.contains(['/', '\\']) || id.chars().any(char::is_whitespace) {
        return Err(HarvestError::Input(format!("R.A 含有非法字符: {}", id)));
    }
    Ok(id.to_string())
}
