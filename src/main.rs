//! # 剪贴板历史条目模型：命令行入口
//!
//! 读取历史记录文件并逐条打印摘要，便于排查持久化问题。
//!
//! ```text
//! clipboard-history-model <history-file> [--config <config.json>]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clipboard_history_model::clipboard::{ClipboardEntry, is_image_format};
use clipboard_history_model::error::AppError;
use clipboard_history_model::history::{ClipboardHistory, HistoryConfig};

const PREVIEW_CHARS: usize = 48;

#[derive(Parser)]
#[command(name = "clipboard-history-model")]
#[command(version, about = "Inspect a clipboard history file", long_about = None)]
struct Cli {
    /// History file path
    history: PathBuf,
    /// JSON config used for preferred formats and image bounds
    #[arg(long)]
    config: Option<PathBuf>,
}

fn preview(entry: &ClipboardEntry) -> String {
    if is_image_format(entry.format()) {
        return match entry.render_image(Some(entry.format())) {
            Some(image) => format!("[图片 {}x{}]", image.source_width, image.source_height),
            None => "[无法解码的图片]".to_string(),
        };
    }

    let text = entry.text();
    let mut line: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(PREVIEW_CHARS)
        .collect();
    if text.chars().count() > PREVIEW_CHARS {
        line.push('…');
    }
    line
}

fn run(args: Cli) -> Result<(), AppError> {
    let config = args
        .config
        .as_deref()
        .map(HistoryConfig::load_from_path)
        .unwrap_or_default();

    let (history, failures) = ClipboardHistory::load(&args.history, config)?;

    for (index, entry) in history.iter().enumerate() {
        println!(
            "{:>4}  {:016x}  {:<24}  {:<40}  {}",
            index,
            entry.data_hash(),
            entry.format(),
            entry.formats().join(","),
            preview(entry)
        );
    }
    for failure in &failures {
        println!("{:>4}  <损坏>  {}", failure.index, failure.error);
    }

    log::info!("共 {} 个条目，{} 个损坏", history.len(), failures.len());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("加载历史记录失败: {err}");
            ExitCode::FAILURE
        }
    }
}
