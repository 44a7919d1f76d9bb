//! End-to-end parsing behavior across tokenize, bind, and help.

use std::path::PathBuf;
use std::time::Duration;

use hashwalk_args::{
    BindError, OptKind, ParseError, Schema, Strictness, render_help, tokenize,
};

#[derive(Debug, Default)]
struct ScanOpts {
    quiet: bool,
    folders: Vec<PathBuf>,
    limit: u32,
    label: String,
    window: Option<Duration>,
}

fn scan_schema() -> Schema<ScanOpts> {
    Schema::builder(
        "scantool",
        "scantool -f=FOLDER,... [-q] [-l=N] [-t=TEXT] [-w=SPAN]",
        "Scans folders and reports what it finds.",
    )
    .array('f', Some("folder"), "Folders to scan.", |o: &mut ScanOpts, v: Vec<PathBuf>| {
        o.folders = v
    })
    .required()
    .flag('q', Some("quiet"), "Suppress progress output.", |o| {
        o.quiet = true
    })
    .single('l', Some("limit"), "Stop after this many entries.", |o, v: u32| {
        o.limit = v
    })
    .single('t', Some("tag"), "Label attached to the report.", |o, v: String| {
        o.label = v
    })
    .single('w', Some("window"), "Only scan entries inside this span.", |o, v| {
        o.window = Some(v)
    })
    .build()
    .unwrap()
}

#[test]
fn full_line_binds_every_field() {
    let mut opts = ScanOpts::default();
    scan_schema()
        .parse_line(
            "scantool -q -f=\"dir one\",dir-two -l=1_000 -t=nightly -w=01:30",
            &mut opts,
            Strictness::Strict,
        )
        .unwrap();

    assert!(opts.quiet);
    assert_eq!(
        opts.folders,
        [PathBuf::from("dir one"), PathBuf::from("dir-two")]
    );
    assert_eq!(opts.limit, 1_000);
    assert_eq!(opts.label, "nightly");
    assert_eq!(opts.window, Some(Duration::from_secs(5_400)));
}

#[test]
fn binding_never_affects_later_help_rendering() {
    let schema = scan_schema();
    let before = render_help(&schema, 72);

    let mut opts = ScanOpts::default();
    schema
        .parse_line("scantool -f=a -l=0xFF", &mut opts, Strictness::Strict)
        .unwrap();
    assert_eq!(opts.limit, 255);

    assert_eq!(before, render_help(&schema, 72));
}

#[test]
fn schema_survives_repeated_parse_calls() {
    let schema = scan_schema();
    for line in ["scantool -f=a", "scantool -f=b -q", "scantool -f=c -l=7"] {
        let mut opts = ScanOpts::default();
        schema.parse_line(line, &mut opts, Strictness::Strict).unwrap();
        assert_eq!(opts.folders.len(), 1);
    }
}

#[test]
fn conversion_failure_points_at_the_offending_token() {
    let line = "scantool -f=a -l=many";
    let mut opts = ScanOpts::default();
    let err = scan_schema()
        .parse_line(line, &mut opts, Strictness::Strict)
        .unwrap_err();

    let ParseError::Bind(BindError::Convert { key, position, .. }) = err else {
        panic!("expected a conversion error, got {err:?}");
    };
    assert_eq!(key, "l");
    assert_eq!(position, 14);
    assert_eq!(line.chars().nth(position), Some('-'));
}

/// Re-parsing the key/value syntax printed for each option reproduces the
/// kind classification the schema declared.
#[test]
fn printed_option_syntax_round_trips_to_the_declared_kind() {
    let schema = scan_schema();
    for spec in schema.specs() {
        let sample = match spec.kind {
            OptKind::Flag => format!("-{}", spec.short),
            OptKind::Single => format!("-{}=value", spec.short),
            OptKind::Array => format!("-{}=one,two", spec.short),
        };
        let tokens = tokenize(&sample).unwrap();
        assert_eq!(tokens.len(), 1);
        let found = schema.find(&tokens[0].key).unwrap();
        assert_eq!(found.kind, spec.kind);
        match spec.kind {
            OptKind::Flag => assert!(tokens[0].values.is_empty()),
            OptKind::Single => assert_eq!(tokens[0].values.len(), 1),
            OptKind::Array => assert_eq!(tokens[0].values.len(), 2),
        }
    }
}
