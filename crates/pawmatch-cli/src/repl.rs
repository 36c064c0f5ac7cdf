//! Interactive catalog loop driven by stdin commands.

use std::io::Write as _;

use anyhow::{bail, Context};
use pawmatch_catalog::{CatalogAction, CatalogController, FetchOutcome, MatchOutcome};
use pawmatch_client::CatalogApi;
use pawmatch_core::{navigate, Access, AgeRange, DogId, Session, View};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

pub(crate) const HELP: &str = "\
commands:
  list              show every breed that can be selected
  breeds [a,b,..]   filter by breeds (no argument clears the filter)
  sort              toggle breed sort direction
  age <min> <max>   filter by age range (0-20)
  zip [code]        filter by 5-digit zip code (no argument clears it)
  next | prev       move between pages
  fav <id>          add or remove a dog from favorites
  reset             clear breed, age and zip filters
  reset-favs        clear favorites
  match             generate a match from favorites
  show              redraw the catalog
  logout            end the session
  help              show this help
  quit              exit";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Action(CatalogAction),
    ListBreeds,
    Match,
    Show,
    Logout,
    Help,
    Quit,
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exit {
    Quit,
    LoggedOut,
    Expired,
}

/// Parses one input line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns an error for unknown commands or malformed arguments.
pub(crate) fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word {
        "" => return Ok(None),
        "breeds" => Command::Action(CatalogAction::SetBreeds(rest.split(',').collect())),
        "list" => Command::ListBreeds,
        "sort" => Command::Action(CatalogAction::ToggleSort),
        "age" => {
            let bounds: Vec<&str> = rest.split_whitespace().collect();
            let [min, max] = bounds.as_slice() else {
                bail!("usage: age <min> <max>");
            };
            let min: u32 = min.parse().with_context(|| format!("invalid minimum age '{min}'"))?;
            let max: u32 = max.parse().with_context(|| format!("invalid maximum age '{max}'"))?;
            Command::Action(CatalogAction::SetAgeRange(AgeRange::new(min, max)?))
        }
        "zip" => Command::Action(CatalogAction::SetZip(rest.to_owned())),
        "next" => Command::Action(CatalogAction::NextPage),
        "prev" => Command::Action(CatalogAction::PrevPage),
        "fav" => {
            if rest.is_empty() {
                bail!("usage: fav <id>");
            }
            Command::Action(CatalogAction::ToggleFavorite(DogId::new(rest)))
        }
        "reset" => Command::Action(CatalogAction::ResetFilters),
        "reset-favs" => Command::Action(CatalogAction::ResetFavorites),
        "match" => Command::Match,
        "show" => Command::Show,
        "logout" => Command::Logout,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}'; type `help` for a list"),
    };
    Ok(Some(command))
}

/// A logout answered with 401 still lands on login, but the session had
/// already expired rather than ended.
fn logout_exit(session: &Session) -> Exit {
    if session.is_expired() {
        Exit::Expired
    } else {
        Exit::LoggedOut
    }
}

fn print_catalog<A: CatalogApi>(ctrl: &CatalogController<A>, columns: usize) {
    println!("{}", render::catalog(ctrl.state(), columns));
}

fn print_notices<A: CatalogApi>(ctrl: &mut CatalogController<A>) {
    for notice in ctrl.drain_notices() {
        println!("{}", render::notice(&notice));
    }
}

/// Runs the catalog until the user quits, logs out or the session expires.
///
/// # Errors
///
/// Returns an error if stdin or stdout fails.
pub(crate) async fn run<A: CatalogApi>(
    ctrl: &mut CatalogController<A>,
    columns: usize,
) -> anyhow::Result<Exit> {
    let mut session_changes = ctrl.session().subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    ctrl.load_breeds().await;
    ctrl.refresh().await;
    print_notices(ctrl);
    if ctrl.session().is_expired() {
        return Ok(Exit::Expired);
    }
    print_catalog(ctrl, columns);
    println!("\ntype `help` for commands");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            changed = session_changes.changed() => {
                if changed.is_err() || !ctrl.session().is_authenticated() {
                    return Ok(Exit::Expired);
                }
                continue;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            return Ok(Exit::Quit);
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };

        match command {
            Command::Action(action) => {
                let outcome = ctrl.dispatch(action).await;
                print_notices(ctrl);
                if matches!(outcome, Some(FetchOutcome::Unauthorized)) {
                    return Ok(Exit::Expired);
                }
                print_catalog(ctrl, columns);
            }
            Command::ListBreeds => {
                let state = ctrl.state();
                println!(
                    "{}",
                    render::breed_list(state.breeds_available(), &state.filters().breeds, columns)
                );
            }
            Command::Match => {
                match navigate(View::Match, ctrl.session(), ctrl.state().favorites()) {
                    Access::Granted(_) => match ctrl.request_match().await {
                        MatchOutcome::Matched(result) => {
                            println!("{}", render::match_view(&result));
                            println!("\n`show` returns to the catalog");
                        }
                        MatchOutcome::BackToCatalog => print_notices(ctrl),
                        MatchOutcome::Login => return Ok(Exit::Expired),
                    },
                    Access::Redirect(View::Login) => return Ok(Exit::Expired),
                    Access::Redirect(_) => {
                        println!("Favorite at least one dog before generating a match.");
                    }
                }
            }
            Command::Show => print_catalog(ctrl, columns),
            Command::Logout => {
                if ctrl.logout().await == View::Login {
                    return Ok(logout_exit(ctrl.session()));
                }
                print_notices(ctrl);
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Exit::Quit),
        }
    }
}
