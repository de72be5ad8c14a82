use serenity::all::Role;

/// Creates a Serenity `Role` as Discord's guild roles endpoint would return it.
///
/// Only the id, name, colour and position vary; the role is not hoisted,
/// managed or mentionable and carries no permissions.
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (invalid test data)
///
/// ```rust,ignore
/// let role = create_test_role(111, "chrome green verified", 0x00FF00, 3);
/// assert_eq!(role.name, "chrome green verified");
/// ```
pub fn create_test_role(role_id: u64, name: &str, color: u32, position: i16) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": color,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": "0",
        "managed": false,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}
