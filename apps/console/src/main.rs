use std::{sync::Arc, time::Duration};

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{
    HttpSolver, LocalSolver, SessionConfig, SessionError, SessionEvent, SolveOutcome,
    SolveSession, Solver,
};
use cube::CubeModel;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{broadcast::error::RecvError, Mutex},
};
use tracing::{debug, warn};

mod commands;
mod render;

use commands::{parse_command, resolve_searcher, Command, HELP};
use render::{describe_status, render_net};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8470")]
    server_url: String,
    /// Search in-process instead of calling a solver server.
    #[arg(long)]
    local: bool,
    #[arg(long, default_value_t = 350)]
    animation_interval_ms: u64,
    #[arg(long, default_value_t = 10)]
    solve_grace_secs: u64,
    #[arg(long)]
    max_states: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let solver: Arc<dyn Solver> = if args.local {
        Arc::new(LocalSolver::new())
    } else {
        Arc::new(HttpSolver::new(&args.server_url)?)
    };
    let config = SessionConfig {
        animation_interval: Duration::from_millis(args.animation_interval_ms),
        solve_grace: Duration::from_secs(args.solve_grace_secs),
        max_states: args.max_states,
    };
    let cube = Arc::new(Mutex::new(CubeModel::new()));

    let session = match SolveSession::connect(solver.clone(), cube.clone(), config.clone()).await {
        Ok(session) => session,
        Err(SessionError::CatalogMismatch(reason)) => {
            bail!("solver at {} speaks a different action catalog: {reason}", args.server_url)
        }
        Err(error) => {
            warn!(%error, "solver not reachable; solve will retry on demand");
            SolveSession::new(solver, cube, config)
        }
    };

    spawn_event_printer(&session);
    println!("{HELP}\n");
    println!("{}", render_net(&session.cube_snapshot().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                println!("error: {error}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(error) = dispatch(&session, command).await {
            println!("error: {error}");
        }
    }

    session.cancel().await;
    Ok(())
}

async fn dispatch(session: &Arc<SolveSession>, command: Command) -> Result<()> {
    match command {
        Command::Show => print_cube(session).await,
        Command::Rotate(action) => {
            session.rotate(action).await?;
            print_cube(session).await;
        }
        Command::Scramble(depth) => {
            let trace = session.scramble(depth).await?;
            let labels: Vec<String> = trace.iter().map(ToString::to_string).collect();
            println!("scrambled with {}", labels.join(" "));
            print_cube(session).await;
        }
        Command::Reset => {
            session.reset().await?;
            print_cube(session).await;
        }
        Command::Solve {
            time_limit_secs,
            searcher,
        } => {
            let searchers = session
                .searchers()
                .await
                .unwrap_or_else(solver::searcher_names);
            let index = resolve_searcher(searcher.as_deref(), &searchers)?;
            let session = session.clone();
            tokio::spawn(async move {
                if let Err(error) = session.solve(time_limit_secs, index).await {
                    println!("solve failed: {error}");
                }
            });
            println!("solving...");
        }
        Command::Step => match session.step().await? {
            Some(_) => print_cube(session).await,
            None => println!("no queued actions"),
        },
        Command::Animate => {
            let session = session.clone();
            tokio::spawn(async move {
                match session.animate_all().await {
                    Ok(0) => println!("no queued actions"),
                    Ok(applied) => {
                        println!("played {applied} actions");
                        print_cube(&session).await;
                    }
                    Err(error) => println!("animation stopped: {error}"),
                }
            });
        }
        Command::Cancel => {
            match session.cancel().await {
                Some(phase) => println!("cancelled while {phase}"),
                None => println!("nothing to cancel"),
            }
        }
        Command::Status => {
            println!("{}", describe_status(&session.status().await));
            let queue: Vec<String> = session.queue().await.iter().map(ToString::to_string).collect();
            if !queue.is_empty() {
                println!("queued: {}", queue.join(" "));
            }
        }
        Command::Searchers => match session.searchers().await {
            Some(searchers) => {
                for (index, name) in searchers.iter().enumerate() {
                    println!("{index}: {name}");
                }
            }
            None => println!("solver has not advertised its searchers"),
        },
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

async fn print_cube(session: &SolveSession) {
    let state = session.cube_snapshot().await;
    println!("{}", render_net(&state));
    if state.is_solved() {
        println!("solved");
    }
}

fn spawn_event_printer(session: &SolveSession) {
    let mut events = session.subscribe_events();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::ActionApplied { action, remaining }) => {
                    println!("applied {action} ({remaining} left)");
                }
                Ok(SessionEvent::SolveFinished(SolveOutcome::Solved {
                    explored_states,
                    length,
                })) => {
                    println!("found {length} action solution after {explored_states} states");
                }
                Ok(SessionEvent::SolveFinished(SolveOutcome::NotFound { explored_states })) => {
                    println!("no solution within budget ({explored_states} states explored)");
                }
                Ok(event) => debug!(?event, "session event"),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "event printer lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });
}
