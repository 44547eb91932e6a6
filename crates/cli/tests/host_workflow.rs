//! End-to-end host workflow
//!
//! Drives the two library crates the way the injection host does: load a
//! rule file, match a class and its methods, then invoke the runtime hooks
//! with the configuration indices the matcher produced.

use bytelego_hooks::{Clock, HookAction, ManualClock, MemorySink, MethodHooks};
use bytelego_rules::RuleStore;
use std::fs;

const RULES: &str = r#"[
    {
        "className": ["com.example.app.MainActivity"],
        "methodName": ["onCreate"],
        "insertCodeConfig": {
            "className": "com.example.app.InsertCode",
            "onMethodBefore": "onMethodEnter",
            "onMethodAfter": "onMethodExit"
        }
    },
    {
        "className": ["com.example.app.MainActivity"],
        "methodName": ["onResume"],
        "insertCodeConfig": {
            "className": "com.example.app.InsertCode",
            "onMethodAfter": "onMethodExit"
        }
    },
    {
        "methodAnnotation": "com.example.app.ClickGuard",
        "insertCodeConfig": {
            "className": "com.example.app.InsertCode",
            "onMethodBefore": "onMethodEnter"
        }
    }
]"#;

#[test]
fn rules_drive_hooks_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytelego.json");
    fs::write(&path, RULES).unwrap();

    let store = RuleStore::new();
    assert!(store.reload_if_changed(&path).unwrap());

    let clock = ManualClock::new(1_700_000_000_000);
    let mut hooks = MethodHooks::new();
    let mut sink = MemorySink::new();

    store.with_rules(|rules| {
        let class = rules.match_class("com/example/app/MainActivity", None);

        // onCreate matches rule 0: timed method.
        let on_create = class.match_method("onCreate", None);
        assert_eq!(on_create.len(), 1);
        let (create_index, _) = on_create[0];
        assert_eq!(
            HookAction::from_index(create_index as i64),
            Some(HookAction::TimedCreate)
        );

        hooks.on_method_enter_indexed(create_index as i64, &clock);
        clock.advance(75);
        hooks.on_method_exit_indexed(create_index as i64, &clock, &mut sink);

        // onResume matches rule 1: exit-only report against the start
        // timestamp onCreate left behind.
        let on_resume = class.match_method("onResume", None);
        assert_eq!(on_resume.len(), 1);
        let (resume_index, rule) = on_resume[0];
        assert!(rule
            .insert_code_config
            .as_ref()
            .unwrap()
            .on_method_before
            .is_none());

        clock.advance(25);
        hooks.on_method_enter_indexed(resume_index as i64, &clock);
        hooks.on_method_exit_indexed(resume_index as i64, &clock, &mut sink);

        // A click handler annotated with the guard matches rule 2.
        let click = class.match_method("onClick", Some("Lcom/example/app/ClickGuard;"));
        assert_eq!(click.len(), 1);
        let (guard_index, _) = click[0];
        hooks.on_method_enter_indexed(guard_index as i64, &clock);
        hooks.on_method_exit_indexed(guard_index as i64, &clock, &mut sink);
    });

    assert_eq!(
        sink.lines(),
        vec![
            "create timing = 75",
            // Measured from onCreate's entry: 75 + 25.
            "activity method timing = 100",
        ]
    );
    assert_eq!(hooks.debouncer().last_event_ms(), clock.now_millis());
}

#[test]
fn unmatched_class_produces_no_injection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytelego.json");
    fs::write(
        &path,
        r#"[{"className": ["com.example.app.MainActivity"], "methodName": ["onCreate"]}]"#,
    )
    .unwrap();

    let store = RuleStore::new();
    store.reload_if_changed(&path).unwrap();

    store.with_rules(|rules| {
        let class = rules.match_class("com/example/app/Other", None);
        assert!(class.hits().is_empty());
    });
}
