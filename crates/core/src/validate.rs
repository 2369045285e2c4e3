use crate::{
    data::{Novel, Role},
    error::ValidationErrors,
};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_USERNAME_LEN: usize = 3;

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[inline]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// At least three ascii letters or digits, nothing else.
pub fn is_valid_username(user_name: &str) -> bool {
    user_name.len() >= MIN_USERNAME_LEN && user_name.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn validate_login(user_name: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if user_name.trim().is_empty() {
        errors.add("userName", "Username is required");
    }
    if password.trim().is_empty() {
        errors.add("pwd", "Password is required");
    }
    errors.into_result()
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.user_name.is_empty() {
            errors.add("userName", "Username is required");
        } else if !is_valid_username(&self.user_name) {
            errors.add(
                "userName",
                "Username must be at least 3 characters and contain no special symbols/spaces.",
            );
        }

        check_email(&mut errors, &self.email);

        if self.password.is_empty() {
            errors.add("pwd", "Password is required");
        } else if !is_valid_password(&self.password) {
            errors.add("pwd", "Password must be at least 6 characters.");
        }

        if self.confirm_password != self.password {
            errors.add("confirmPwd", "Passwords do not match.");
        }

        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateUserForm {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

impl CreateUserForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.user_name.is_empty() {
            errors.add("userName", "Username is required");
        } else if self.user_name.chars().count() < MIN_USERNAME_LEN {
            errors.add("userName", "Username must be at least 3 characters.");
        }

        check_email(&mut errors, &self.email);

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if !is_valid_password(&self.password) {
            errors.add("password", "Password must be at least 6 characters.");
        }

        if self.role.is_none() {
            errors.add("role", "Role must be selected.");
        }

        errors.into_result()
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Invalid email address format.");
    }
}

/// Title presence and catalog-wide uniqueness, plus the rating range.
/// `existing` is the fetched catalog; a novel being updated is skipped by id.
pub fn validate_novel(novel: &Novel, existing: &[Novel]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let title = novel.title.trim().to_lowercase();

    if title.is_empty() {
        errors.add("novelName", "Novel name is required");
    } else if existing
        .iter()
        .filter(|other| novel.id.is_empty() || other.id != novel.id)
        .any(|other| other.title.trim().to_lowercase() == title)
    {
        errors.add("novelName", "Novel name already exists");
    }

    if !(0.0..=5.0).contains(&novel.rating) {
        errors.add("rate", "Rating must be between 0 and 5");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_validate_email() {
        assert!(is_valid_email("reader@example.com"));
        assert!(is_valid_email("a.b@mail.co.uk"));
        assert!(!is_valid_email("reader@example"));
        assert!(!is_valid_email("reader example@x.io"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn should_validate_username() {
        assert!(is_valid_username("abc"));
        assert!(is_valid_username("Reader42"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("user name"));
        assert!(!is_valid_username("user_1"));
    }

    #[test]
    fn should_require_login_fields() {
        let errors = validate_login("  ", "").unwrap_err();
        assert_eq!(errors.get("userName"), Some("Username is required"));
        assert_eq!(errors.get("pwd"), Some("Password is required"));
        assert!(validate_login("alice", "secret").is_ok());
    }

    #[test]
    fn should_collect_register_errors() {
        let form = RegisterForm {
            user_name: String::from("al"),
            email: String::from("nope"),
            password: String::from("123"),
            confirm_password: String::from("1234"),
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.iter().count(), 4);
        assert_eq!(errors.get("confirmPwd"), Some("Passwords do not match."));

        let form = RegisterForm {
            user_name: String::from("alice"),
            email: String::from("alice@example.com"),
            password: String::from("secret1"),
            confirm_password: String::from("secret1"),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn should_require_role_for_created_user() {
        let form = CreateUserForm {
            user_name: String::from("bob"),
            email: String::from("bob@example.com"),
            password: String::from("secret1"),
            role: None,
        };
        assert_eq!(form.validate().unwrap_err().get("role"), Some("Role must be selected."));
    }

    #[test]
    fn should_reject_duplicate_novel_title() {
        let mut existing = Novel::new(String::from("The Long Road"), String::new());
        existing.id = String::from("n1");

        let draft = Novel::new(String::from("  the long road "), String::new());
        let errors = validate_novel(&draft, &[existing.clone()]).unwrap_err();
        assert_eq!(errors.get("novelName"), Some("Novel name already exists"));

        // updating the same novel keeps its own title
        assert!(validate_novel(&existing, &[existing.clone()]).is_ok());

        let mut draft = Novel::new(String::from("Fresh"), String::new());
        draft.rating = 7.0;
        assert!(validate_novel(&draft, &[existing]).unwrap_err().get("rate").is_some());
    }
}
