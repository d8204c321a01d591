//! Registration input checks
//!
//! The field rules the registration screens enforce, applied again at the
//! service boundary.

use floodsafe_core::{Error, NewUser, Result, Role};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// Check a registration submission; the message is shown to the user as-is
pub fn validate_registration(profile: &NewUser) -> Result<()> {
    if profile.username.trim().len() < MIN_USERNAME_LEN {
        return Err(Error::Validation(
            "Username must be at least 3 characters".to_string(),
        ));
    }
    if !is_valid_email(&profile.email) {
        return Err(Error::Validation("Enter a valid email address".to_string()));
    }
    if profile.password.len() < MIN_PASSWORD_LEN {
        return Err(Error::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if !is_valid_phone(&profile.phone) {
        return Err(Error::Validation(
            "Enter a valid 10-digit phone number".to_string(),
        ));
    }
    if !is_valid_pincode(&profile.pincode) {
        return Err(Error::Validation(
            "Enter a valid 6-digit pincode".to_string(),
        ));
    }

    for (field, value) in [
        ("full name", &profile.full_name),
        ("address", &profile.address),
        ("city", &profile.city),
        ("state", &profile.state),
    ] {
        if value.trim().is_empty() {
            return Err(Error::Validation(format!("Please provide your {field}")));
        }
    }

    if profile.role == Role::Ngo {
        let missing = profile
            .registration_id
            .as_deref()
            .map_or(true, |id| id.trim().is_empty());
        if missing {
            return Err(Error::Validation(
                "NGO registration id is required".to_string(),
            ));
        }
    }

    Ok(())
}

/// Accepts the `x@y.z` shape; full RFC parsing is not the goal
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_pincode(pincode: &str) -> bool {
    pincode.len() == 6 && pincode.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> NewUser {
        NewUser {
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret1".to_string(),
            role: Role::Citizen,
            full_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address: "12 Marine Drive".to_string(),
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            pincode: "400001".to_string(),
            registration_id: None,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(validate_registration(&valid_profile()).is_ok());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("a.b@mail.example.co"));
        assert!(!is_valid_email("asha"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("asha@.com"));
        assert!(!is_valid_email("asha @example.com"));
    }

    #[test]
    fn test_phone_and_pincode() {
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("98765"));
        assert!(!is_valid_phone("98765432a0"));

        assert!(is_valid_pincode("400001"));
        assert!(!is_valid_pincode("4000"));
        assert!(!is_valid_pincode("40000x"));
    }

    #[test]
    fn test_rejections_carry_messages() {
        let mut short_password = valid_profile();
        short_password.password = "abc".to_string();
        assert!(matches!(
            validate_registration(&short_password),
            Err(Error::Validation(_))
        ));

        let mut bad_phone = valid_profile();
        bad_phone.phone = "12".to_string();
        assert!(validate_registration(&bad_phone).is_err());
    }

    #[test]
    fn test_ngo_needs_registration_id() {
        let mut ngo = valid_profile();
        ngo.role = Role::Ngo;
        assert!(validate_registration(&ngo).is_err());

        ngo.registration_id = Some("NGO-2024-117".to_string());
        assert!(validate_registration(&ngo).is_ok());
    }
}
