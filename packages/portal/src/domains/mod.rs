pub mod onboarding;
pub mod users;
