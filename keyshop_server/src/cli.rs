use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Be explicit about which envars to print, so as to avoid accidentally exposing secrets
    const DISPLAY_ENVS: [&str; 15] = [
        "RUST_LOG",
        "KSG_HOST",
        "KSG_PORT",
        "KSG_REDIS_URL",
        "KSG_TRANSACTIONS_COLLECTION",
        "KSG_PRICE_KEY",
        "KSG_STOCK_KEY",
        "KSG_STATUS_TTL",
        "KSG_FETCH_TIMEOUT",
        "KSG_STATUS_REFRESH_INTERVAL",
        "KSG_MARKET_URL",
        "KSG_MARKET_TIMEOUT",
        "KSG_ROTURL_STATUS",
        "KSG_ADMIN_IDS",
        "KSG_IDENTITY_HEADER",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
