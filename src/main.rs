use std::env;
use std::path::PathBuf;
use std::process;

use spotify_folders::rootlist::{leveldb, locate, Rootlist, RootlistError};

const USAGE: &str = "\
Get your Spotify folder hierarchy with playlists into JSON.

Usage: spotifyfolders [OPTIONS] [folder]

Arguments:
  folder                Get only a specific Spotify folder. If omitted, the
                        entire hierarchy is returned. A folder is specified
                        by its URL or URI. Obtain this by dragging a folder
                        into a Terminal window, or by clicking on a folder
                        in Spotify and pressing Cmd+C.

Options:
  -i, --info            Information about Spotify folders on this machine.
  -a, --account NAME    Sometimes a machine has multiple Spotify accounts.
                        This gets the folder hierarchy of a specific account.
                        To see a list of all found accounts, use `-i`.
      --cache DIR       Specify a custom PersistentCache directory to look
                        for data in.
  -h, --help            Show this help message and exit.";

struct CliArgs {
    folder: Option<String>,
    info: bool,
    account: Option<String>,
    cache_dir: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let mut parsed = CliArgs {
        folder: None,
        info: false,
        account: None,
        cache_dir: None,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            "-i" | "--info" => parsed.info = true,
            "-a" | "--account" => match args.next() {
                Some(name) => parsed.account = Some(name),
                None => {
                    eprintln!("ERROR: --account requires an argument.");
                    process::exit(2);
                }
            },
            "--cache" => match args.next() {
                Some(dir) => parsed.cache_dir = Some(PathBuf::from(dir)),
                None => {
                    eprintln!("ERROR: --cache requires an argument.");
                    process::exit(2);
                }
            },
            flag if flag.starts_with('-') => {
                eprintln!("ERROR: Unknown option {}. See `--help`.", flag);
                process::exit(2);
            }
            _ if parsed.folder.is_none() => parsed.folder = Some(arg),
            _ => {
                eprintln!("ERROR: More than one folder given. See `--help`.");
                process::exit(2);
            }
        }
    }
    parsed
}

fn print_info(usernames: &[String]) {
    if usernames.is_empty() {
        println!("Found 0 Spotify accounts on this machine.");
        return;
    }
    let suffix = if usernames.len() == 1 { "" } else { "s" };
    println!();
    println!(
        "Found {} Spotify account{} on this machine:",
        usernames.len(),
        suffix
    );
    println!();
    for name in usernames {
        println!(" - {}", name);
    }
    println!();
    println!(
        "To see the folder hierarchy of a specific user, run\n\n  \
         spotifyfolders --account NAME\n"
    );
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let cache_dir = args
        .cache_dir
        .clone()
        .or_else(locate::default_cache_dir)
        .unwrap_or_else(|| {
            eprintln!("Could not determine the Spotify cache directory; use `--cache`.");
            process::exit(2);
        });

    let usernames = locate::usernames(&cache_dir);
    if args.info {
        print_info(&usernames);
        return;
    }

    if let Some(account) = &args.account {
        if !usernames.contains(account) {
            eprintln!(
                "Unknown username {:?}. To see all found usernames, use `--info`.",
                account
            );
            process::exit(2);
        }
    }

    let mut username = args.account.clone();
    let mut folder_id = None;
    if let Some(folder) = &args.folder {
        if !folder.contains('/') && !folder.contains(':') {
            eprintln!("Specify folder as a URL or Spotify URI. See `--help`.");
            process::exit(2);
        }
        let separator = if folder.find('/').map_or(false, |i| i > 0) {
            '/'
        } else {
            ':'
        };
        let parts: Vec<&str> = folder.split(separator).collect();
        if parts.len() < 3 {
            eprintln!("Specify folder as a URL or Spotify URI. See `--help`.");
            process::exit(2);
        }
        username = Some(parts[parts.len() - 3].to_string());
        folder_id = Some(parts[parts.len() - 1].to_string());
    }

    let search_dir = match &username {
        Some(name) => locate::user_dir(&cache_dir, name),
        None => cache_dir.clone(),
    };
    let files = locate::candidate_files(&search_dir);
    let found = match leveldb::find_rootlist(&files, username.as_deref()) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
    };
    let Some((username, raw_rootlist)) = found else {
        eprintln!(
            "No data found in the Spotify cache. If you have a custom cache\n\
             directory set, specify its path with the `--cache` flag.\n\
             Also, in the Spotify app, check Settings -> Offline storage location."
        );
        process::exit(2);
    };

    let rootlist = match Rootlist::parse(&raw_rootlist, &username) {
        Ok(rootlist) => rootlist,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
    };

    let node = match rootlist.folder(folder_id.as_deref()) {
        Ok(node) => node,
        Err(RootlistError::FolderNotFound(_)) => {
            println!("Folder not found :(");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
    };

    match serde_json::to_string(node) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(2);
        }
    }
}
