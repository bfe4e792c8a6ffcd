/// SQL schema for the cache database
pub const SCHEMA: &str = r#"
PRAGMA user_version = 1;

-- users: one row per listed user, read back ordered by id
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    login TEXT NOT NULL,
    avatar_url TEXT,
    gravatar_id TEXT,
    node_id TEXT,
    url TEXT,
    html_url TEXT,
    followers_url TEXT,
    following_url TEXT,
    gists_url TEXT,
    starred_url TEXT,
    subscriptions_url TEXT,
    organizations_url TEXT,
    repos_url TEXT,
    events_url TEXT,
    received_events_url TEXT,
    user_type TEXT,
    site_admin INTEGER NOT NULL DEFAULT 0
);

-- remote_keys: where the next network page starts after each cached user
CREATE TABLE IF NOT EXISTS remote_keys (
    user_id INTEGER PRIMARY KEY,
    prev_key INTEGER,
    next_key INTEGER
);

-- user_detail: full profile, replaced wholesale on refetch
CREATE TABLE IF NOT EXISTS user_detail (
    id INTEGER PRIMARY KEY,
    login TEXT NOT NULL,
    avatar_url TEXT,
    gravatar_id TEXT,
    node_id TEXT,
    url TEXT,
    html_url TEXT,
    followers_url TEXT,
    following_url TEXT,
    gists_url TEXT,
    starred_url TEXT,
    subscriptions_url TEXT,
    organizations_url TEXT,
    repos_url TEXT,
    events_url TEXT,
    received_events_url TEXT,
    user_type TEXT,
    site_admin INTEGER NOT NULL DEFAULT 0,
    name TEXT,
    company TEXT,
    blog TEXT,
    location TEXT,
    email TEXT,
    hireable INTEGER,
    bio TEXT,
    twitter_username TEXT,
    public_repos INTEGER,
    public_gists INTEGER,
    followers INTEGER,
    following INTEGER,
    created_at TEXT,
    updated_at TEXT,
    fetched_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_user_detail_login ON user_detail(login);
"#;
