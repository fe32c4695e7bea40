use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::QueueError;
use crate::queue::BoundedQueue;

/// A list of queue operations replayed against a fresh queue.
///
/// Example script:
/// ```toml
/// capacity = 5
///
/// [[ops]]
/// op    = "add"
/// value = 11
///
/// [[ops]]
/// op = "poll"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Missing = take the capacity from the command line or config.
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub ops: Vec<Op>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Add { value: i64 },
    Offer { value: i64 },
    Peek,
    Element,
    Poll,
    Remove,
    Snapshot,
    Clear,
    Stats,
    Contains { value: i64 },
    Iter,
}

impl Op {
    pub fn label(&self) -> String {
        match self {
            Op::Add { value }      => format!("add({})", value),
            Op::Offer { value }    => format!("offer({})", value),
            Op::Peek               => "peek".into(),
            Op::Element            => "element".into(),
            Op::Poll               => "poll".into(),
            Op::Remove             => "remove".into(),
            Op::Snapshot           => "snapshot".into(),
            Op::Clear              => "clear".into(),
            Op::Stats              => "stats".into(),
            Op::Contains { value } => format!("contains({})", value),
            Op::Iter               => "iter".into(),
        }
    }
}

/// What a single step produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Done,
    Accepted { accepted: bool },
    Value { value: Option<i64> },
    Items { items: Vec<i64> },
    Stats { len: usize, remaining: usize, full: bool, empty: bool },
    Error { error: String, message: String },
}

impl Outcome {
    fn from_err(e: QueueError) -> Self {
        Outcome::Error { error: e.kind().to_string(), message: e.to_string() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            Outcome::Done                    => "ok".into(),
            Outcome::Accepted { accepted }   => if *accepted { "accepted".into() } else { "rejected".into() },
            Outcome::Value { value: Some(v) } => v.to_string(),
            Outcome::Value { value: None }   => "none".into(),
            Outcome::Items { items }         => format!("{:?}", items),
            Outcome::Stats { len, remaining, full, empty } => format!(
                "len={} remaining={} full={} empty={}", len, remaining, full, empty
            ),
            Outcome::Error { message, .. }   => format!("error: {}", message),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub index: usize,
    pub op: String,
    pub outcome: Outcome,
    /// Queue length after the step.
    pub len: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub capacity: usize,
    pub steps: Vec<Step>,
    pub remaining: Vec<i64>,
}

impl Report {
    pub fn error_count(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_error()).count()
    }
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        let script: Script = toml::from_str(text).context("invalid script")?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::parse(&text)
    }

    /// Capacity 5, tail wraps past the last slot back to 0..2, then the
    /// queue fills and drains in order.
    pub fn wraparound_demo() -> Self {
        let mut ops = vec![
            Op::Add { value: 11 },
            Op::Offer { value: 22 },
            Op::Poll,
            Op::Add { value: 33 },
            Op::Poll,
        ];
        ops.extend([44, 55, 66, 77].into_iter().map(|value| Op::Offer { value }));
        ops.push(Op::Offer { value: 222 });
        ops.push(Op::Stats);
        ops.extend(std::iter::repeat(Op::Poll).take(5));
        ops.push(Op::Remove);
        ops.push(Op::Stats);
        Script { capacity: Some(5), ops }
    }
}

/// Run every op in order. A bad capacity aborts; queue errors from
/// individual ops are recorded and the replay carries on.
pub fn replay(script: &Script, capacity_override: Option<i64>) -> Result<Report> {
    let cap = capacity_override
        .or(script.capacity)
        .ok_or_else(|| anyhow::anyhow!("no capacity given in script or on the command line"))?;
    let mut queue = BoundedQueue::with_signed_capacity(cap)?;

    let steps = script
        .ops
        .iter()
        .enumerate()
        .map(|(index, op)| {
            let outcome = apply(&mut queue, op);
            Step { index, op: op.label(), outcome, len: queue.len() }
        })
        .collect();

    Ok(Report { capacity: queue.capacity(), steps, remaining: queue.to_vec() })
}

fn apply(queue: &mut BoundedQueue<i64>, op: &Op) -> Outcome {
    let res: Result<Outcome, QueueError> = match op {
        Op::Add { value }      => queue.add(*value).map(|_| Outcome::Done),
        Op::Offer { value }    => Ok(Outcome::Accepted { accepted: queue.offer(*value) }),
        Op::Peek               => Ok(Outcome::Value { value: queue.peek().copied() }),
        Op::Element            => queue.element().map(|v| Outcome::Value { value: Some(*v) }),
        Op::Poll               => Ok(Outcome::Value { value: queue.poll() }),
        Op::Remove             => queue.remove().map(|v| Outcome::Value { value: Some(v) }),
        Op::Snapshot           => Ok(Outcome::Items { items: queue.to_vec() }),
        Op::Clear              => {
            queue.clear();
            Ok(Outcome::Done)
        }
        Op::Stats              => Ok(Outcome::Stats {
            len:       queue.len(),
            remaining: queue.remaining_space(),
            full:      queue.is_full(),
            empty:     queue.is_empty(),
        }),
        Op::Contains { value } => queue.contains(value).map(|_| Outcome::Done),
        Op::Iter               => queue.iter().map(|_| Outcome::Done),
    };
    res.unwrap_or_else(Outcome::from_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(report: &Report) -> Vec<Option<i64>> {
        report
            .steps
            .iter()
            .filter_map(|s| match &s.outcome {
                Outcome::Value { value } => Some(*value),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn parses_toml_script() {
        let script = Script::parse(
            r#"
            capacity = 3

            [[ops]]
            op = "add"
            value = 7

            [[ops]]
            op = "offer"
            value = 8

            [[ops]]
            op = "poll"

            [[ops]]
            op = "snapshot"
            "#,
        )
        .unwrap();
        assert_eq!(script.capacity, Some(3));
        assert_eq!(
            script.ops,
            vec![Op::Add { value: 7 }, Op::Offer { value: 8 }, Op::Poll, Op::Snapshot]
        );
    }

    #[test]
    fn unknown_op_is_a_parse_error() {
        let err = Script::parse("[[ops]]\nop = \"shuffle\"\n").unwrap_err();
        assert!(err.to_string().contains("invalid script"));
    }

    #[test]
    fn demo_replays_in_fifo_order() {
        let report = replay(&Script::wraparound_demo(), None).unwrap();
        assert_eq!(report.capacity, 5);
        assert_eq!(
            values(&report),
            vec![
                Some(11),
                Some(22),
                Some(33),
                Some(44),
                Some(55),
                Some(66),
                Some(77),
            ]
        );
        // offer(222) on the full queue
        let rejected = report.steps.iter().find(|s| s.op == "offer(222)").unwrap();
        assert_eq!(rejected.outcome, Outcome::Accepted { accepted: false });
        assert_eq!(rejected.len, 5);

        let last = report.steps.last().unwrap();
        assert_eq!(
            last.outcome,
            Outcome::Stats { len: 0, remaining: 5, full: false, empty: true }
        );
        assert!(report.remaining.is_empty());
        // the trailing strict remove hits the empty queue
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn strict_errors_are_recorded_and_replay_continues() {
        let script = Script {
            capacity: Some(1),
            ops: vec![
                Op::Element,
                Op::Add { value: 1 },
                Op::Add { value: 2 },
                Op::Contains { value: 1 },
                Op::Snapshot,
            ],
        };
        let report = replay(&script, None).unwrap();
        let kinds: Vec<_> = report
            .steps
            .iter()
            .map(|s| match &s.outcome {
                Outcome::Error { error, .. } => error.as_str(),
                _ => "ok",
            })
            .collect();
        assert_eq!(kinds, vec!["empty", "ok", "full", "unsupported", "ok"]);
        assert_eq!(report.steps[4].outcome, Outcome::Items { items: vec![1] });
        assert_eq!(report.remaining, vec![1]);
    }

    #[test]
    fn capacity_override_wins_and_bad_capacity_aborts() {
        let script = Script { capacity: Some(2), ops: vec![Op::Stats] };
        assert_eq!(replay(&script, Some(9)).unwrap().capacity, 9);

        let err = replay(&script, Some(-1)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<QueueError>(),
            Some(&QueueError::InvalidCapacity(-1))
        );

        let no_cap = Script { capacity: None, ops: vec![] };
        assert!(replay(&no_cap, None).is_err());
    }

    #[test]
    fn report_serializes_to_json() {
        let script = Script { capacity: Some(2), ops: vec![Op::Offer { value: 4 }, Op::Peek] };
        let report = replay(&script, None).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["capacity"], 2);
        assert_eq!(json["steps"][0]["outcome"]["kind"], "accepted");
        assert_eq!(json["steps"][1]["outcome"]["value"], 4);
        assert_eq!(json["remaining"][0], 4);
    }
}
