use super::{ApiError, PageQuery};
use crate::domain::PageRequest;
use crate::services::FieldErrors;

fn parse_positive(errors: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<u64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<u64>() {
        Ok(n) if n >= 1 => Some(n),
        _ => {
            errors.add(field, "A positive integer is required.");
            None
        }
    }
}

/// Resolves listing paging parameters. `page_size` falls back to
/// `default_size` and may not exceed [`PageRequest::MAX_PAGE_SIZE`].
pub fn validate_page(query: &PageQuery, default_size: u64) -> Result<PageRequest, ApiError> {
    let mut errors = FieldErrors::new();

    let page = parse_positive(&mut errors, "page", query.page.as_deref()).unwrap_or(1);
    let page_size =
        parse_positive(&mut errors, "page_size", query.page_size.as_deref()).unwrap_or(default_size);

    if page_size > PageRequest::MAX_PAGE_SIZE && !errors.contains("page_size") {
        errors.add(
            "page_size",
            format!(
                "Ensure this value is less than or equal to {}.",
                PageRequest::MAX_PAGE_SIZE
            ),
        );
    }

    errors.into_result().map_err(ApiError::ValidationError)?;
    Ok(PageRequest::new(page, page_size))
}

pub fn validate_actor_id(raw: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::not_found("Actor", raw)),
    }
}
