//! One-shot subcommands
//!
//! Each returns `false` when the command failed in a way the exit code
//! should reflect.

use ghfav::app::FavoritesSession;
use ghfav::data::{FavoritesStore, UserRecord};
use ghfav::error::Result;
use ghfav::lookup::{GithubProfile, UserLookup};

/// Look up each login in turn and add it
pub fn add(store: FavoritesStore, lookup: &dyn UserLookup, logins: &[String]) -> bool {
    let mut session = FavoritesSession::new(store);
    let mut ok = true;

    for login in logins {
        if login.trim().is_empty() {
            eprintln!("Skipping blank login");
            ok = false;
            continue;
        }
        match session.add_from_login(lookup, login) {
            Some(record) => println!("Added {}", describe(&record)),
            None => {
                if let Some(notice) = session.take_notice() {
                    eprintln!("{login}: {notice}");
                    ok = false;
                }
            }
        }
        // A save failure after a successful add still reports
        if let Some(notice) = session.take_notice() {
            eprintln!("{notice}");
            ok = false;
        }
    }

    ok
}

/// Remove a favorite by login; unknown logins are not an error
pub fn remove(store: FavoritesStore, login: &str) -> bool {
    let mut session = FavoritesSession::new(store);

    match session.remove_login(login) {
        Some(record) => println!("Removed {}", describe(&record)),
        None => println!("{login} is not in your favorites"),
    }

    match session.take_notice() {
        Some(notice) => {
            eprintln!("{notice}");
            false
        }
        None => true,
    }
}

/// Print every favorite in display order
pub fn list(store: &FavoritesStore, json: bool) -> Result<bool> {
    if json {
        println!("{}", serde_json::to_string_pretty(store.users())?);
        return Ok(true);
    }

    if store.is_empty() {
        println!("No favorites yet. Add one with `ghfav add <login>`.");
        return Ok(true);
    }

    let width = store
        .users()
        .iter()
        .map(|u| u.login.len())
        .max()
        .unwrap_or(0);

    for (i, user) in store.users().iter().enumerate() {
        let bio = first_line(&user.bio);
        println!(
            "{:>3}. {:<width$}  {}{}",
            i + 1,
            user.login,
            user.name,
            if bio.is_empty() {
                String::new()
            } else {
                format!(" - {bio}")
            },
        );
    }
    Ok(true)
}

/// Print the detail view for one favorite, plus live counts when given a lookup
pub fn show(store: &FavoritesStore, refresh: Option<&dyn UserLookup>, login: &str) -> bool {
    let Some(record) = store.get(login) else {
        eprintln!("{login} is not in your favorites");
        return false;
    };

    for line in detail_lines(record) {
        println!("{line}");
    }

    if let Some(lookup) = refresh {
        match lookup.get(&record.login) {
            Ok(profile) => {
                for line in live_lines(&profile) {
                    println!("{line}");
                }
            }
            Err(e) => {
                eprintln!("Could not refresh {}: {e}", record.login);
                return false;
            }
        }
    }
    true
}

fn describe(record: &UserRecord) -> String {
    if record.name.is_empty() {
        record.login.clone()
    } else {
        format!("{} ({})", record.login, record.name)
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

/// Lines of the detail view, shared with the interactive front end
pub fn detail_lines(record: &UserRecord) -> Vec<String> {
    let mut lines = vec![
        format!("Name:    {}", record.display_name()),
        format!("Login:   {}", record.login),
    ];
    if !record.bio.is_empty() {
        let mut bio = record.bio.lines();
        if let Some(first) = bio.next() {
            lines.push(format!("Bio:     {first}"));
        }
        lines.extend(bio.map(|l| format!("         {l}")));
    }
    if !record.avatar.is_empty() {
        lines.push(format!("Avatar:  {}", record.avatar));
    }
    lines.push(format!("Profile: {}", record.profile_url()));
    lines
}

fn live_lines(profile: &GithubProfile) -> Vec<String> {
    vec![
        format!("Repos:     {}", profile.public_repos),
        format!("Followers: {}", profile.followers),
        format!("Following: {}", profile.following),
    ]
}
