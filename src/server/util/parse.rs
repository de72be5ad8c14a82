use crate::server::error::internal::InternalError;

/// Parses a Discord snowflake stored as a String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed snowflake
/// - `Err(InternalError::ParseStringId)` - The string is not a valid u64
pub fn parse_u64_from_string(value: String) -> Result<u64, InternalError> {
    match value.parse::<u64>() {
        Ok(id) => Ok(id),
        Err(source) => Err(InternalError::ParseStringId { value, source }),
    }
}
