use serenity::all::Member;

/// Creates a Serenity guild `Member` as the get-member endpoint would return it.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Member's user id
/// - `username` - Member's username
/// - `role_ids` - Role ids in the order Discord lists them
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (invalid test data)
pub fn create_test_member(guild_id: u64, user_id: u64, username: &str, role_ids: &[u64]) -> Member {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "user": {
            "id": user_id.to_string(),
            "username": username,
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
        },
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": "2025-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "permissions": null,
        "communication_disabled_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
