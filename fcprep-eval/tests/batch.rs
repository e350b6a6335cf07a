mod common;

use std::cell::Cell;

use common::msg;
use fcprep_core::{Conversation, ConvertError, DatasetFormat, Role};
use fcprep_eval::{convert, convert_named, BatchConverter, ErrorPolicy};

#[test]
fn batch_preserves_input_order() {
    let records: Vec<Conversation> = (0..64).map(common::numbered_conversation).collect();

    for format in DatasetFormat::ALL {
        let converted = convert(records.clone(), &common::config(), format).unwrap();
        assert_eq!(converted.len(), records.len());
        for (index, record) in converted.iter().enumerate() {
            assert_eq!(record.messages[1].content(), format!("question {index}"));
            assert_eq!(record.messages[2].content(), format!("answer {index}"));
        }
    }
}

#[test]
fn empty_dataset_yields_empty_output() {
    let converted = convert(Vec::new(), &common::config(), DatasetFormat::Tagged).unwrap();
    assert!(converted.is_empty());
}

#[test]
fn unknown_format_name_fails_before_any_record_is_read() {
    let pulled = Cell::new(0usize);
    let records = (0..3).map(|marker| {
        pulled.set(pulled.get() + 1);
        common::numbered_conversation(marker)
    });

    let err = convert_named(records, &common::config(), "CSV").unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedFormat(ref name) if name == "CSV"));
    assert_eq!(pulled.get(), 0);
}

#[test]
fn format_names_resolve_to_variants() {
    let batch = BatchConverter::from_format_name("openai", common::config()).unwrap();
    assert_eq!(batch.format(), DatasetFormat::Structured);

    let converted =
        convert_named(vec![common::weather_conversation()], &common::config(), "tagged").unwrap();
    assert!(converted[0].tools.is_empty());
}

#[test]
fn malformed_record_aborts_batch_by_default() {
    let records = vec![
        common::numbered_conversation(0),
        Conversation::new(vec![msg("user", "no system prompt")]),
        common::numbered_conversation(2),
    ];

    let err = convert(records, &common::config(), DatasetFormat::Structured).unwrap_err();
    match err {
        ConvertError::Record { index, ref source } => {
            assert_eq!(index, 1);
            assert!(matches!(**source, ConvertError::MissingSystemMessage { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn abort_reports_lowest_failing_record() {
    let records = vec![
        common::numbered_conversation(0),
        Conversation::new(vec![msg("system", "s"), msg("critic", "x")]),
        Conversation::new(vec![msg("user", "no system prompt")]),
    ];

    let err = convert(records, &common::config(), DatasetFormat::Tagged).unwrap_err();
    assert!(matches!(err, ConvertError::Record { index: 1, .. }));
    assert!(matches!(err.root(), ConvertError::InvalidRole { index: 1, .. }));
}

#[test]
fn skip_policy_drops_only_failing_records() {
    let config = common::builder()
        .error_policy(ErrorPolicy::SkipAndLog)
        .build()
        .unwrap();
    let records = vec![
        common::numbered_conversation(0),
        Conversation::new(vec![msg("user", "no system prompt")]),
        common::numbered_conversation(2),
        Conversation::new(vec![msg("system", "s"), msg("assistant", "<tool_call>[")]),
        common::numbered_conversation(4),
    ];

    let converted = convert(records, &config, DatasetFormat::Structured).unwrap();
    let questions: Vec<&str> = converted
        .iter()
        .map(|record| record.messages[1].content())
        .collect();
    assert_eq!(questions, vec!["question 0", "question 2", "question 4"]);
}

#[test]
fn skip_policy_does_not_hide_unsupported_format() {
    let config = common::builder()
        .error_policy(ErrorPolicy::SkipAndLog)
        .build()
        .unwrap();
    let err = convert_named(vec![common::weather_conversation()], &config, "xml").unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedFormat(_)));
}

#[test]
fn structured_batch_converts_full_tool_exchange() {
    let converted = convert(
        vec![common::weather_conversation(), common::weather_conversation()],
        &common::config(),
        DatasetFormat::Structured,
    )
    .unwrap();

    for record in &converted {
        let roles: Vec<Role> = record.messages.iter().map(|m| m.role()).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::Tool, Role::Assistant]
        );
        assert_eq!(record.tools.len(), 1);
    }
}
