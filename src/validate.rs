//! Field validators shared by the login and joke-submission forms. Lengths
//! are counted in characters, not bytes.

pub fn validate_username(username: &str) -> Option<&'static str> {
    if username.chars().count() < 3 {
        return Some("Usernames must be at least 3 characters long");
    }
    None
}

pub fn validate_password(password: &str) -> Option<&'static str> {
    if password.chars().count() < 6 {
        return Some("Passwords must be at least 6 characters long");
    }
    None
}

pub fn validate_joke_name(name: &str) -> Option<&'static str> {
    if name.chars().count() < 3 {
        return Some("That joke's name is too short");
    }
    None
}

pub fn validate_joke_content(content: &str) -> Option<&'static str> {
    if content.chars().count() < 10 {
        return Some("That joke is too short");
    }
    None
}
