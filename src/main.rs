use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

use pose_angles::config::Config;
use pose_angles::angles::format_degrees;
use pose_angles::pipeline::{FrameOutput, FramePipeline, PoseFeed};
use pose_angles::protocol::FrameReader;

#[derive(Parser, Debug)]
#[command(
    name = "pose_angles",
    version = env!("GIT_VERSION"),
    about = "Joint angles from pose keypoint frames"
)]
struct Args {
    /// フレーム入力 (NDJSON)。省略時は標準入力
    input: Option<PathBuf>,
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
    /// 描画コマンドを JSON で出力する
    #[arg(long)]
    draw_list: bool,
    /// 壊れた行をスキップする（設定より優先）
    #[arg(long)]
    lenient: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = Config::load_or_default(&args.config);
    let lenient = args.lenient || config.input.lenient;

    eprintln!("Pose Angles {}", env!("GIT_VERSION"));
    eprintln!("Overlay: {}", if config.overlay.enabled { "ON" } else { "OFF" });

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let pipeline = FramePipeline::from_config(&config);
    let mut feed = PoseFeed::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let started = Instant::now();
    let mut with_subject = 0u64;
    let mut skipped = 0u64;

    for frame in FrameReader::new(input) {
        let detections = match frame {
            Ok(d) => d,
            Err(e) if lenient && !e.is_io() => {
                log::warn!("skipping frame: {}", e);
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e).context("Failed to read pose frame"),
        };

        feed.receive(detections);
        let output = pipeline.process(feed.snapshot());
        if output.primary.is_some() {
            with_subject += 1;
        }
        write_frame(
            &mut out,
            feed.received_count(),
            &output,
            args.draw_list,
            config.text.precision,
        )?;
    }
    out.flush()?;

    let elapsed = started.elapsed().as_secs_f32();
    log::info!(
        "{} frames ({} with subject, {} skipped) in {:.2}s",
        feed.received_count(),
        with_subject,
        skipped,
        elapsed
    );
    Ok(())
}

fn write_frame<W: Write>(
    out: &mut W,
    frame_no: u64,
    output: &FrameOutput,
    draw_list: bool,
    precision: usize,
) -> Result<()> {
    if draw_list {
        serde_json::to_writer(&mut *out, output)?;
        writeln!(out)?;
        return Ok(());
    }

    match &output.primary {
        Some(primary) => {
            writeln!(out, "frame {}:", frame_no)?;
            for (joint, angle) in primary.angles.iter() {
                match angle {
                    Some(a) => writeln!(out, "  {}: {}°", joint, format_degrees(a, precision))?,
                    None => writeln!(out, "  {}: -", joint)?,
                }
            }
            if let Some(anchor) = &primary.face_anchor {
                writeln!(
                    out,
                    "  face: center=({:.1}, {:.1}) width={:.1}",
                    anchor.center.x, anchor.center.y, anchor.reference_distance
                )?;
            }
        }
        None => writeln!(out, "frame {}: no subject", frame_no)?,
    }
    Ok(())
}
