/// 学生信息，每次运行从个人主页读取一次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    /// R.A
    pub id: String,
    pub name: String,
    pub avatar_url: String,
}
