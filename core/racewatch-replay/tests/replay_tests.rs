use racewatch_analyzer::{Analyzer, EventDispatcher, Violation};
use racewatch_replay::{
    read_trace, replay, replay_file, write_trace, ReplayError, TraceReader, TraceWriter,
};
use racewatch_types::{ThreadId, TraceEvent, VarId};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

fn t(id: u32) -> ThreadId {
    ThreadId::new(id)
}

fn racy_trace() -> Vec<TraceEvent> {
    vec![
        TraceEvent::read(t(0), "x"),
        TraceEvent::read(t(1), "x"),
        TraceEvent::write(t(0), "x"),
        TraceEvent::write(t(1), "x"),
    ]
}

fn dispatcher_with_recorder() -> (EventDispatcher, Arc<Mutex<Vec<Violation>>>) {
    let violations = Arc::new(Mutex::new(Vec::new()));
    let mut analyzer = Analyzer::new();
    let sink = violations.clone();
    analyzer.set_read_violation_handler(move |v| {
        sink.lock().unwrap().push(Violation::Read(v.clone()));
    });
    let sink = violations.clone();
    analyzer.set_write_violation_handler(move |v| {
        sink.lock().unwrap().push(Violation::Write(v.clone()));
    });
    (EventDispatcher::new(analyzer), violations)
}

#[test]
fn writer_emits_one_line_per_event() {
    let mut writer = TraceWriter::new(Vec::new());
    for event in racy_trace() {
        writer.write_event(&event).unwrap();
    }
    let text = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.ends_with('\n'));
}

#[test]
fn file_roundtrip_preserves_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.trace");
    let events = racy_trace();

    write_trace(&path, &events).unwrap();
    assert_eq!(read_trace(&path).unwrap(), events);
}

#[test]
fn replay_file_detects_recorded_races() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.trace");
    write_trace(&path, &racy_trace()).unwrap();

    let (dispatcher, violations) = dispatcher_with_recorder();
    let delivered = replay_file(&path, &dispatcher).unwrap();

    assert_eq!(delivered, 4);
    assert_eq!(violations.lock().unwrap().len(), 2);
    let snap = dispatcher.snapshot();
    assert_eq!(snap.write_clocks[&VarId::from("x")].get(t(1)), 1);
}

#[test]
fn replay_skips_blank_lines() {
    let trace = "\n{\"event\":\"write\",\"thread\":0,\"var\":\"x\"}\n\n  \n{\"event\":\"read\",\"thread\":0,\"var\":\"x\"}\n";
    let (dispatcher, _) = dispatcher_with_recorder();

    let delivered = replay(TraceReader::new(Cursor::new(trace)), &dispatcher).unwrap();
    assert_eq!(delivered, 2);
}

#[test]
fn replay_handles_missing_trailing_newline() {
    let trace = "{\"event\":\"write\",\"thread\":0,\"var\":\"x\"}";
    let (dispatcher, _) = dispatcher_with_recorder();

    let delivered = replay(TraceReader::new(Cursor::new(trace)), &dispatcher).unwrap();
    assert_eq!(delivered, 1);
}

#[test]
fn parse_error_reports_line_number() {
    let trace = "{\"event\":\"write\",\"thread\":0,\"var\":\"x\"}\n\nnot json\n";
    let mut reader = TraceReader::new(Cursor::new(trace));

    assert!(reader.next().unwrap().is_ok());
    match reader.next().unwrap() {
        Err(ReplayError::Parse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn replay_stops_at_first_bad_line() {
    let trace = "{\"event\":\"write\",\"thread\":0,\"var\":\"x\"}\ngarbage\n";
    let (dispatcher, _) = dispatcher_with_recorder();

    let result = replay(TraceReader::new(Cursor::new(trace)), &dispatcher);
    assert!(matches!(result, Err(ReplayError::Parse { line: 2, .. })));
    // the good prefix was still delivered
    assert!(dispatcher.snapshot().write_clocks.contains_key(&VarId::from("x")));
}

#[test]
fn open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.trace");
    assert!(matches!(read_trace(&missing), Err(ReplayError::Io(_))));
}

#[test]
fn fork_join_trace_replays_cleanly() {
    let handle = racewatch_types::ThreadHandle::new();
    // ids in the trace anticipate the analyzer's allocation: the fork by
    // T0 binds the handle to T1
    let events = vec![
        TraceEvent::fork(t(0), handle),
        TraceEvent::write(t(1), "x"),
        TraceEvent::join(t(0), handle),
        TraceEvent::write(t(0), "x"),
    ];
    let (dispatcher, violations) = dispatcher_with_recorder();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forkjoin.trace");
    write_trace(&path, &events).unwrap();
    replay_file(&path, &dispatcher).unwrap();

    assert!(violations.lock().unwrap().is_empty());
}
