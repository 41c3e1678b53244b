/// `host[:port]` part of a base URL, for display in the page header.
pub fn hostname_from_url(u: &str) -> String {
    let s = u.trim();
    let s = s.split_once("://").map(|(_, rest)| rest).unwrap_or(s);
    let authority = s.split(['/', '?', '#']).next().unwrap_or(s);
    let host = authority.rsplit_once('@').map(|(_, h)| h).unwrap_or(authority);
    host.to_string()
}
