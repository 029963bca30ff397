//! Account name lookup over `passwd(5)` / `group(5)` formatted text.

/// Numeric id of `name` in a `passwd` file (`name:x:uid:gid:...`).
#[must_use]
pub fn lookup_uid(passwd: &str, name: &str) -> Option<u32> {
    lookup_id(passwd, name)
}

/// Numeric id of `name` in a `group` file (`name:x:gid:members`).
#[must_use]
pub fn lookup_gid(group: &str, name: &str) -> Option<u32> {
    lookup_id(group, name)
}

fn lookup_id(db: &str, name: &str) -> Option<u32> {
    db.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .find_map(|line| {
            let mut fields = line.split(':');
            if fields.next()? != name {
                return None;
            }
            fields.nth(1)?.parse().ok()
        })
}
