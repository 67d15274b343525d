pub const WELCOME_MESSAGE: &str = "Welcome to Pioneer Lab!";

pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}
