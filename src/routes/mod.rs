pub mod health;
pub mod players;

pub const GREETING: &str = "Server is running!";

// GET / - Liveness text
pub async fn root() -> &'static str {
    GREETING
}
