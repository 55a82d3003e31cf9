//! Property-based tests for sinklog using proptest

use proptest::prelude::*;
use sinklog::format::{EvalCounter, TextFormatter};
use sinklog::prelude::*;
use std::sync::Arc;

fn single_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::DEBUG),
        Just(LogLevel::INFO),
        Just(LogLevel::WARNING),
        Just(LogLevel::ERROR),
    ]
}

fn any_level() -> impl Strategy<Value = LogLevel> {
    (0u8..=15).prop_map(LogLevel::from_bits_truncate)
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// A configured level accepts exactly the single levels whose bit it has
    #[test]
    fn test_accepts_matches_bit_test(configured in any_level(), level in single_level()) {
        let expected = (configured.bits() & level.bits()) == level.bits();
        prop_assert_eq!(configured.accepts(level), expected);
    }

    #[test]
    fn test_all_accepts_and_none_rejects(level in single_level()) {
        prop_assert!(LogLevel::ALL.accepts(level));
        prop_assert!(!LogLevel::NONE.accepts(level));
    }

    /// Display then parse yields the same level, composites included
    #[test]
    fn test_level_display_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_string().parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    #[test]
    fn test_level_json_roundtrip(level in any_level()) {
        let json = serde_json::to_string(&level).unwrap();
        let parsed: LogLevel = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, level);
    }

    #[test]
    fn test_invalid_level_names_rejected(name in "[xyz0-9]{1,10}") {
        prop_assert!(name.parse::<LogLevel>().is_err());
    }
}

// ============================================================================
// Dispatch Tests
// ============================================================================

proptest! {
    /// A compound accepts what any member accepts, and each member only
    /// receives what it accepts itself
    #[test]
    fn test_compound_routes_by_member_level(
        levels in prop::collection::vec(any_level(), 1..5),
        entries in prop::collection::vec(single_level(), 0..30),
    ) {
        let members: Vec<Arc<ListSink>> =
            levels.iter().map(|level| Arc::new(ListSink::new(*level))).collect();
        let log = CompoundLog::new(
            members.iter().map(|m| Arc::clone(m) as Arc<dyn Log>).collect(),
        );

        prop_assert_eq!(log.level(), LogLevel::combine(levels.iter().copied()));

        for level in &entries {
            log.log(*level, "entry");
        }

        for (member, configured) in members.iter().zip(&levels) {
            let expected = entries.iter().filter(|l| configured.accepts(**l)).count();
            prop_assert_eq!(member.len(), expected);
            prop_assert!(member.entries().iter().all(|e| configured.accepts(e.level)));
        }
    }

    #[test]
    fn test_stack_and_queue_orders(messages in prop::collection::vec("[a-z]{1,8}", 1..20)) {
        let stack = StackSink::new(LogLevel::ALL);
        let queue = QueueSink::new(LogLevel::ALL);
        for message in &messages {
            stack.info(message.as_str());
            queue.info(message.as_str());
        }

        let popped: Vec<String> =
            std::iter::from_fn(|| stack.pop()).map(|e| e.message).collect();
        let dequeued: Vec<String> =
            std::iter::from_fn(|| queue.dequeue()).map(|e| e.message).collect();

        let mut reversed = messages.clone();
        reversed.reverse();
        prop_assert_eq!(popped, reversed);
        prop_assert_eq!(dequeued, messages);
    }

    /// Entries logged faster than the window allows: only the first
    /// `limit` reach the inner log
    #[test]
    fn test_rate_limiter_forwards_at_most_limit(limit in 1usize..10, sent in 0usize..40) {
        let list = Arc::new(ListSink::new(LogLevel::ALL));
        let log = RateLimiter::new(Arc::clone(&list), limit, std::time::Duration::from_secs(3600))
            .unwrap();

        for i in 0..sent {
            log.info(format!("{}", i));
        }

        let forwarded = sent.min(limit);
        prop_assert_eq!(list.len(), forwarded);
        prop_assert_eq!(log.metrics().suppressed_count() as usize, sent - forwarded);
        prop_assert_eq!(log.is_limited(), sent > limit);
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    #[test]
    fn test_message_only_layout_is_identity(message in ".*") {
        let formatter = TextFormatter::builder().message().build();
        let entry = LogEntry::new(message.clone(), LogLevel::INFO, CallSite::caller());
        prop_assert_eq!(formatter.format(&entry).unwrap(), message);
    }

    /// Each committed evaluation advances the counter by exactly one
    #[test]
    fn test_counter_commits_are_sequential(start in -100i64..100, count in 1usize..20) {
        let formatter = TextFormatter::builder()
            .counter(EvalCounter::indexed_from(start))
            .build();

        for i in 0..count {
            let rendered = formatter.format_standalone().unwrap();
            prop_assert_eq!(rendered, (start + i as i64).to_string());
        }
    }
}
