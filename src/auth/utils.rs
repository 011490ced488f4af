use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

pub fn require_owner(claims: &Claims, resource_owner: &str) -> AppResult<()> {
    if claims.sub != resource_owner {
        return Err(AppError::Forbidden(
            "You can only use your own reviewers".to_string(),
        ));
    }
    Ok(())
}
