//! Print an example rule file

use anyhow::Result;
use bytelego_rules::InjectRule;

const EXAMPLE: &str = r#"[
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

pub fn run() -> Result<()> {
    println!("{}", EXAMPLE);
    Ok(())
}
