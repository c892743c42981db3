use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use protocol::{
    hanoi::render_moves, to_json, CellMove, DistanceMatrix, Player, Square, TicTacToeBoard,
    MAX_DISKS, SRI_LANKA_CITIES,
};
use puzzle_ai::{
    compare, count_solutions, BacktrackingSolver, HanoiAlgorithm, TicTacToeAlgorithm,
    TspAlgorithm, WarnsdorffSolver,
};
use puzzle_portal::{PortalSettings, Session, SolveRunner, TicTacToeMatch};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Puzzle portal solvers", long_about = None)]
struct Args {
    /// Settings file (defaults to the user config directory)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Player name for result records
    #[clap(long, global = true)]
    player: Option<String>,

    /// Seed for the randomized solvers
    #[clap(long, global = true)]
    seed: Option<u64>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count (or list) the Eight Queens solutions
    Queens {
        #[clap(long)]
        list: bool,
    },
    /// Find a knight's tour from a starting square
    Knight {
        /// Starting square in notation, e.g. a1
        #[clap(long, default_value = "a8")]
        start: String,
        #[clap(long, value_enum, default_value = "warnsdorff")]
        algorithm: KnightAlgorithm,
    },
    /// Ask the engine for a 5x5 Tic-Tac-Toe move
    Tictactoe {
        /// Five comma-separated rows using X, O and '.'
        #[clap(long)]
        board: String,
        #[clap(long, default_value = "O")]
        player: char,
        #[clap(long, value_enum, default_value = "minimax")]
        engine: TicTacToeEngine,
    },
    /// Play X against the engine and print the result record when the game ends
    Versus {
        /// Moves as row:col, comma-separated, e.g. 2:2,0:0
        #[clap(long, value_delimiter = ',')]
        moves: Vec<String>,
        #[clap(long, value_enum, default_value = "minimax")]
        engine: TicTacToeEngine,
    },
    /// Solve the Tower of Hanoi or check a move sequence
    Hanoi {
        #[clap(
            long,
            default_value_t = 3,
            value_parser = clap::value_parser!(u32).range(0..=MAX_DISKS as i64)
        )]
        disks: u32,
        #[clap(long, value_enum, default_value = "recursive")]
        algorithm: HanoiKind,
        /// Comma-separated moves such as "A->C, A->B" to validate
        #[clap(long)]
        submit: Option<String>,
    },
    /// Solve a traveling salesman tour on the Sri Lanka road matrix
    Tsp {
        #[clap(long, default_value_t = 0)]
        home: usize,
        /// Comma-separated city indices
        #[clap(long, value_delimiter = ',')]
        cities: Vec<usize>,
        /// Algorithm to run; all three are compared when omitted
        #[clap(long, value_enum)]
        algorithm: Option<TspKind>,
    },
    /// Show the effective settings, optionally writing them out
    Settings {
        #[clap(long)]
        save: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KnightAlgorithm {
    Backtracking,
    Warnsdorff,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TicTacToeEngine {
    Minimax,
    Mcts,
}

impl From<TicTacToeEngine> for TicTacToeAlgorithm {
    fn from(engine: TicTacToeEngine) -> Self {
        match engine {
            TicTacToeEngine::Minimax => TicTacToeAlgorithm::Minimax,
            TicTacToeEngine::Mcts => TicTacToeAlgorithm::Mcts,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum HanoiKind {
    Recursive,
    Iterative,
    FrameStewart,
}

impl From<HanoiKind> for HanoiAlgorithm {
    fn from(kind: HanoiKind) -> Self {
        match kind {
            HanoiKind::Recursive => HanoiAlgorithm::Recursive,
            HanoiKind::Iterative => HanoiAlgorithm::Iterative,
            HanoiKind::FrameStewart => HanoiAlgorithm::FrameStewart,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TspKind {
    BruteForce,
    NearestNeighbor,
    Genetic,
}

impl From<TspKind> for TspAlgorithm {
    fn from(kind: TspKind) -> Self {
        match kind {
            TspKind::BruteForce => TspAlgorithm::BruteForce,
            TspKind::NearestNeighbor => TspAlgorithm::NearestNeighbor,
            TspKind::Genetic => TspAlgorithm::Genetic,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = PortalSettings::load(args.config.as_deref());

    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("puzzle_portal={}", settings.log_level.as_str()).parse()?)
                .add_directive(format!("puzzle_ai={}", settings.log_level.as_str()).parse()?),
        )
        .init();

    let session = match &args.player {
        Some(name) => Session::new(name.clone()),
        None => Session::from_settings(&settings),
    };
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let runner = SolveRunner::from_settings(&settings);

    info!("门户启动，玩家: {}", session.player_name());

    match args.command {
        Command::Queens { list } => {
            if list {
                let solutions = runner
                    .submit("queens", || puzzle_ai::QueensSolver::eight().solutions())
                    .result()
                    .await?;
                for rows in &solutions {
                    let squares = puzzle_ai::queens::placement_squares(rows);
                    println!("{}", puzzle_ai::solution_key(&squares));
                }
                println!("{} solutions", solutions.len());
            } else {
                let count = runner.submit("queens", count_solutions).result().await?;
                println!("{} solutions", count);
            }
        }

        Command::Knight { start, algorithm } => {
            let start = Square::from_notation(&start)
                .with_context(|| format!("无效的起点: {}", start))?;
            let step_limit = settings.knight_step_limit;
            let path = match algorithm {
                KnightAlgorithm::Backtracking => {
                    runner
                        .submit("backtracking", move || {
                            let mut solver = match step_limit {
                                Some(limit) => BacktrackingSolver::with_step_limit(limit),
                                None => BacktrackingSolver::new(),
                            };
                            solver.solve(start)
                        })
                        .result()
                        .await?
                }
                KnightAlgorithm::Warnsdorff => WarnsdorffSolver::solve(start),
            };
            match path {
                Some(path) => println!("{}", to_json(&session.knight_result(&path))?),
                None => println!("No tour found from {}", start.to_notation()),
            }
        }

        Command::Tictactoe {
            board,
            player,
            engine,
        } => {
            let rows: Vec<&str> = board.split(',').map(str::trim).collect();
            let rows: [&str; 5] = rows
                .try_into()
                .map_err(|_| anyhow::anyhow!("棋盘需要 5 行"))?;
            let board = TicTacToeBoard::from_rows(rows).context("棋盘格式无效")?;
            let Some(player) = Player::from_char(player) else {
                bail!("玩家必须是 X 或 O: {}", player);
            };

            let result = board.result();
            if result.is_over() {
                println!("Game over: {:?}", result);
                return Ok(());
            }

            let mv = TicTacToeAlgorithm::from(engine).choose_move(
                &board,
                player,
                settings.minimax_depth,
                settings.mcts_simulations,
                &mut rng,
            );
            if let Some(mv) = mv {
                println!("{}", board.with_move(mv, player));
                println!("{} plays {}", player, mv);
            }
        }

        Command::Versus { moves, engine } => {
            let mut game = TicTacToeMatch::from_settings(engine.into(), &settings);
            for text in &moves {
                let mv = parse_cell(text)?;
                let reply = game
                    .play(mv, &mut rng)
                    .with_context(|| format!("无法落子 {}", text))?;
                if let Some(reply) = reply {
                    println!("O plays {}", reply);
                }
                if game.result().is_over() {
                    break;
                }
            }
            println!("{}", game.board());
            match session.tictactoe_result(game.algorithm(), &game.result(), game.move_times()) {
                Some(result) => println!("{}", to_json(&result)?),
                None => println!("Game not finished"),
            }
        }

        Command::Hanoi {
            disks,
            algorithm,
            submit,
        } => {
            let algorithm = HanoiAlgorithm::from(algorithm);
            match submit {
                Some(sequence) => {
                    match session.hanoi_submission(algorithm, disks, &sequence)? {
                        Some(submission) => println!("{}", to_json(&submission)?),
                        None => println!("Not solved yet"),
                    }
                }
                None => {
                    let moves = algorithm.solve(disks)?;
                    println!("{}", render_moves(&moves).join(", "));
                    println!("{} moves", moves.len());
                }
            }
        }

        Command::Tsp {
            home,
            cities,
            algorithm,
        } => {
            let matrix = DistanceMatrix::sri_lanka();
            let timed = match algorithm {
                Some(kind) => TspAlgorithm::from(kind).solve_timed(
                    &matrix,
                    home,
                    &cities,
                    &settings.genetic,
                    &mut rng,
                ),
                None => {
                    let comparison = compare(&matrix, home, &cities, &settings.genetic, &mut rng);
                    for result in &comparison.results {
                        println!(
                            "{}: {} ({:.3} ms)",
                            result.algorithm.display_name(),
                            result.tour.distance,
                            result.time_ms
                        );
                    }
                    match comparison.shortest() {
                        Some(shortest) => shortest.clone(),
                        None => bail!("无效的城市选择: 起点 {}，城市 {:?}", home, cities),
                    }
                }
            };
            if timed.tour.is_empty() {
                bail!("无效的城市选择: 起点 {}，城市 {:?}", home, cities);
            }
            let names: Vec<&str> = std::iter::once(home)
                .chain(timed.tour.route.iter().copied())
                .chain(std::iter::once(home))
                .map(|i| SRI_LANKA_CITIES[i])
                .collect();
            println!("{}", names.join(" -> "));
            let record = session.tsp_record(home, &cities, timed);
            println!("{}", to_json(&record)?);
        }

        Command::Settings { save } => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if save {
                let path = match &args.config {
                    Some(path) => {
                        settings.save_to(path)?;
                        path.clone()
                    }
                    None => settings.save()?,
                };
                println!("Saved to {}", path.display());
            }
        }
    }

    Ok(())
}

/// 解析 "row:col" 形式的落子
fn parse_cell(text: &str) -> Result<CellMove> {
    let (row, col) = text
        .trim()
        .split_once(':')
        .with_context(|| format!("落子格式应为 row:col: {}", text))?;
    let row = row.trim().parse().with_context(|| format!("无效的行: {}", row))?;
    let col = col.trim().parse().with_context(|| format!("无效的列: {}", col))?;
    Ok(CellMove::new(row, col))
}
