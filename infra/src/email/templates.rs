//! Mail templates with `{{placeholder}}` substitution
//!
//! Templates are addressed by id; callers supply a flat map of
//! substitutions. Unknown template ids are an error so a typo in a caller
//! fails loudly instead of sending an empty mail.

use std::collections::HashMap;

use crate::InfrastructureError;

const USER_ACTIVATION_MAIL: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; padding: 20px; color: #333;">
    <h2>Welcome to Mercato, {{name}}!</h2>
    <p>Use the following code to verify your email address and activate your account:</p>
    <p style="font-size: 32px; letter-spacing: 8px; font-weight: bold; margin: 30px 0;">{{otp}}</p>
    <p style="color: #666; font-size: 14px;">
        The code expires in 5 minutes. If you did not sign up, please ignore this email.
    </p>
</body>
</html>"#;

const FORGOT_PASSWORD_USER_MAIL: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; padding: 20px; color: #333;">
    <h2>Password Reset Request</h2>
    <p>Hi {{name}}, we received a request to reset your password.</p>
    <p>Enter the following code to continue:</p>
    <p style="font-size: 32px; letter-spacing: 8px; font-weight: bold; margin: 30px 0;">{{otp}}</p>
    <p style="color: #666; font-size: 14px;">
        The code expires in 5 minutes. If you did not request this, please ignore this email
        or contact support immediately.
    </p>
</body>
</html>"#;

/// Render the named template, substituting every `{{key}}` from `data`
pub fn render_template(
    template_id: &str,
    data: &HashMap<String, String>,
) -> Result<String, InfrastructureError> {
    let template = match template_id {
        "user-activation-mail" => USER_ACTIVATION_MAIL,
        "forgot-password-user-mail" => FORGOT_PASSWORD_USER_MAIL,
        _ => {
            return Err(InfrastructureError::Email(format!(
                "Unknown mail template: {}",
                template_id
            )))
        }
    };

    let mut body = template.to_string();
    for (key, value) in data {
        let placeholder = format!("{{{{{}}}}}", key);
        body = body.replace(&placeholder, value);
    }
    Ok(body)
}
