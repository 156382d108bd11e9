use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Result;

use noteline::config::EngineConfig;
use noteline::core::engine::NoteEngine;
use noteline::core::note::NoteId;
use noteline::messaging::{EngineMessage, MessageBus};
use noteline::playback::{AudioSink, CpalSink, NullSink};
use noteline::utils::helpers::format_frequency;

fn main() -> Result<()> {
    env_logger::init();

    let config = EngineConfig::load_or_default()?;
    log::info!(
        "note line {}..{}, {} Hz, {} s tones",
        config.line_start,
        config.line_end,
        config.sample_rate,
        config.duration_secs
    );

    // Fall back to silent operation when there is no audio device, so
    // the engine can still be driven (useful over SSH and in CI).
    let mut _stream = None;
    let sink: Box<dyn AudioSink> = match CpalSink::new() {
        Ok((sink, stream)) => {
            _stream = Some(stream);
            Box::new(sink)
        }
        Err(e) => {
            log::warn!("no audio output ({e}), running silent");
            Box::new(NullSink)
        }
    };

    let engine = Arc::new(RwLock::new(NoteEngine::new(config, sink)));
    let bus = MessageBus::new(Arc::clone(&engine));

    println!("noteline - markers on a line, C3..C6");
    println!("commands: add <x> | drag <id> <x> | play <id> | rm <id> | freq <id> | ls | stop | bounce <file> | quit");

    let stdin = io::stdin();
    loop {
        // Pick up release timer firings before the next command.
        bus.process_messages(64);

        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else { continue };

        match command {
            "add" => match parts.next().and_then(|s| s.parse::<f32>().ok()) {
                Some(x) => {
                    if let Ok(mut engine) = engine.write() {
                        let id = engine.add_note(x);
                        let freq = engine.query_frequency(id).unwrap_or_default();
                        println!("note {id} at x={x} -> {}", format_frequency(freq));
                    }
                }
                None => println!("usage: add <x>"),
            },
            "drag" => match (parse_id(parts.next()), parts.next().and_then(|s| s.parse::<f32>().ok())) {
                (Some(id), Some(x)) => bus_send(&bus, EngineMessage::RetuneNote(id, x)),
                _ => println!("usage: drag <id> <x>"),
            },
            "play" => match parse_id(parts.next()) {
                Some(id) => bus_send(&bus, EngineMessage::TriggerNote(id)),
                None => println!("usage: play <id>"),
            },
            "rm" => match parse_id(parts.next()) {
                Some(id) => bus_send(&bus, EngineMessage::RemoveNote(id)),
                None => println!("usage: rm <id>"),
            },
            "freq" => match parse_id(parts.next()) {
                Some(id) => {
                    if let Ok(engine) = engine.read() {
                        match engine.query_frequency(id) {
                            Ok(freq) => println!("{}", format_frequency(freq)),
                            Err(e) => println!("{e}"),
                        }
                    }
                }
                None => println!("usage: freq <id>"),
            },
            "ls" => {
                if let Ok(engine) = engine.read() {
                    for note in engine.notes() {
                        println!(
                            "{} x={:<6} {:>10} {:?}",
                            note.id,
                            note.position,
                            format_frequency(note.frequency),
                            note.state
                        );
                    }
                }
            }
            "stop" => bus_send(&bus, EngineMessage::StopAll),
            "bounce" => match parts.next() {
                Some(file) => {
                    if let Ok(engine) = engine.read() {
                        match engine.bounce_mix(Path::new(file)) {
                            Ok(()) => println!("wrote {file}"),
                            Err(e) => println!("bounce failed: {e}"),
                        }
                    }
                }
                None => println!("usage: bounce <file>"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command: {other}"),
        }

        bus.process_messages(64);
    }

    Ok(())
}

fn parse_id(arg: Option<&str>) -> Option<NoteId> {
    arg.and_then(|s| s.trim_start_matches('#').parse::<u64>().ok()).map(NoteId)
}

fn bus_send(bus: &MessageBus, msg: EngineMessage) {
    if bus.send(msg).is_err() {
        log::error!("engine queue closed");
    }
}
