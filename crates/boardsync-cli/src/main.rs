use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use boardsync_cli::commands;
use boardsync_cli::config::{Overrides, load_config_file, merge_config, replay_options};
use boardsync_core::CastleRule;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "センサー盤の読み取りから指し手を推定する")]
struct Cli {
    /// 設定ファイル（TOML）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// デバッグログを出力する
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 2つの盤面の差分を指し手に分類する
    Classify {
        start: String,
        end: String,
        /// rook-distance | king-destination
        #[arg(long)]
        castle_rule: Option<CastleRule>,
        #[arg(long)]
        json: bool,
    },
    /// 盤面に指し手（e2e4 形式）を順に適用する
    Apply {
        board: String,
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// 指し手列を再生し、各手の表記と最終盤面・手番を出力する
    Replay {
        /// 初期盤面（既定は平手）
        #[arg(long)]
        initial: Option<String>,
        #[arg(long)]
        castle_rule: Option<CastleRule>,
        #[arg(long)]
        json: bool,
        moves: Vec<String>,
    },
    /// 1行1盤面の読み取りを追従する（`takeback` / `reset` 行も受け付ける）
    Follow {
        /// 入力ファイル（`-` または未指定で標準入力）
        #[arg(long)]
        input: Option<PathBuf>,
        /// 開始盤面
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        castle_rule: Option<CastleRule>,
        /// 到達可能性の確認を行わない
        #[arg(long)]
        no_verify: bool,
        /// 保存済みの履歴から再開する
        #[arg(long)]
        resume: Option<PathBuf>,
        /// 終了時に履歴を保存する
        #[arg(long)]
        save_history: Option<PathBuf>,
    },
    /// 駒種ごとの到達候補を出力する
    Reach { kind: String, square: String },
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let file = cli.config.as_ref().map(load_config_file).transpose()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Classify { start, end, castle_rule, json } => {
            let overrides = Overrides { castle_rule, ..Overrides::default() };
            let options = merge_config(file.as_ref(), &overrides);
            commands::classify(&mut out, &start, &end, options.castle_rule, json)
        }
        Command::Apply { board, moves } => commands::apply(&mut out, &board, &moves),
        Command::Replay { initial, castle_rule, json, moves } => {
            let overrides = Overrides { start_board: initial, castle_rule, ..Overrides::default() };
            let options = merge_config(file.as_ref(), &overrides);
            commands::replay_moves(&mut out, &moves, &replay_options(&options), json)
        }
        Command::Follow { input, start, castle_rule, no_verify, resume, save_history } => {
            let overrides = Overrides {
                start_board: start,
                castle_rule,
                verify_reachability: no_verify.then_some(false),
            };
            let options = merge_config(file.as_ref(), &overrides);
            let summary = match input.filter(|p| p.as_os_str() != "-") {
                Some(path) => {
                    let f = File::open(&path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    commands::follow(
                        BufReader::new(f),
                        &mut out,
                        options,
                        resume.as_deref(),
                        save_history.as_deref(),
                    )?
                }
                None => commands::follow(
                    io::stdin().lock(),
                    &mut out,
                    options,
                    resume.as_deref(),
                    save_history.as_deref(),
                )?,
            };
            log::info!(
                "accepted {} moves, rejected {} snapshots",
                summary.accepted,
                summary.rejected
            );
            Ok(())
        }
        Command::Reach { kind, square } => commands::reach(&mut out, &kind, &square),
    }
}
