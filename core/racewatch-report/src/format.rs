//! Text rendering for violations and state dumps.

use racewatch_analyzer::{AnalyzerSnapshot, Violation};
use std::fmt::Write as _;
use std::io;

/// Renders one violation as a single line.
///
/// ```text
/// write race on x by T1: C[T1]=<T1:1>, R[x]=<T0:1,T1:1>, W[x]=<T0:1,T1:1>
/// read race on x by T1: C[T1]=<T1:1>, W[x]=<T0:1>
/// ```
#[must_use]
pub fn violation_line(violation: &Violation) -> String {
    match violation {
        Violation::Read(v) => format!(
            "read race on {} by {}: C[{}]={}, W[{}]={}",
            v.var, v.thread, v.thread, v.thread_clock, v.var, v.write_clock
        ),
        Violation::Write(v) => format!(
            "write race on {} by {}: C[{}]={}, R[{}]={}, W[{}]={}",
            v.var, v.thread, v.thread, v.thread_clock, v.var, v.read_clock, v.var, v.write_clock
        ),
    }
}

/// Writes one line per violation.
pub fn write_report(mut w: impl io::Write, violations: &[Violation]) -> io::Result<()> {
    for violation in violations {
        writeln!(w, "{}", violation_line(violation))?;
    }
    Ok(())
}

/// Renders the final clock dump: every thread, variable, and lock clock,
/// sorted by id for stable output.
#[must_use]
pub fn render_snapshot(snapshot: &AnalyzerSnapshot) -> String {
    let mut out = String::new();
    let rule = "===============================================";
    let _ = writeln!(out, "{rule}");

    let mut threads: Vec<_> = snapshot.thread_clocks.iter().collect();
    threads.sort_by_key(|(&thread, _)| thread);
    for (thread, clock) in threads {
        let _ = writeln!(out, "Thread {thread}'s clock: {clock}");
    }

    let mut vars: Vec<_> = snapshot.read_clocks.keys().collect();
    vars.sort();
    for var in vars {
        if let Some(clock) = snapshot.read_clocks.get(var) {
            let _ = writeln!(out, "Read clock for {var}: {clock}");
        }
        if let Some(clock) = snapshot.write_clocks.get(var) {
            let _ = writeln!(out, "Write clock for {var}: {clock}");
        }
    }

    let mut locks: Vec<_> = snapshot.lock_clocks.iter().collect();
    locks.sort_by_key(|(lock, _)| *lock);
    for (lock, clock) in locks {
        let _ = writeln!(out, "Lock clock for {lock}: {clock}");
    }

    let _ = writeln!(out, "{rule}");
    out
}
