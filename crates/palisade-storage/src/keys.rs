//! Storage key encoding and entity type constants.
//!
//! Every entity key in the system store is produced by [`get_key`] so that
//! all records share one namespacing convention: the entity type as the
//! leading segment, disambiguating parts joined by `_` thereafter.

/// Delimiter between key segments
pub const KEY_DELIMITER: &str = "_";

/// User records: `user_{name}` → User
pub const TYPE_USER: &str = "user";

/// Group records: `group_{name}` → Group
pub const TYPE_GROUP: &str = "group";

/// Token records (token store): `token_{id}` → Token
pub const TYPE_TOKEN: &str = "token";

/// Resource records — reserved for the bootstrap extension stage
pub const TYPE_RESOURCE: &str = "resource";

/// Policy records — reserved for the bootstrap extension stage
pub const TYPE_POLICY: &str = "policy";

/// Role records — reserved for the bootstrap extension stage
pub const TYPE_ROLE: &str = "role";

/// Encode a storage key from an entity type and any number of key parts.
///
/// The mapping is deterministic and injective as long as no individual
/// part contains the delimiter. Parts are joined verbatim: validation of
/// part contents is deliberately left to callers, which lets the same
/// function serve both exact lookups and prefix scans by entity type.
pub fn get_key(entity_type: &str, key_parts: &[&str]) -> Vec<u8> {
    let mut all_parts = Vec::with_capacity(1 + key_parts.len());
    all_parts.push(entity_type);
    all_parts.extend_from_slice(key_parts);
    all_parts.join(KEY_DELIMITER).into_bytes()
}
