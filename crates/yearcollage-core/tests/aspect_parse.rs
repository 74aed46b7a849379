use yearcollage_core::{AspectRatio, CollageError};

#[test]
fn parses_common_ratios() {
    let cases = [("1:1", 1.0), ("3:2", 1.5), ("2:3", 2.0 / 3.0), ("16:9", 16.0 / 9.0)];
    for (input, want) in cases {
        let got = AspectRatio::parse(input).expect("parse");
        assert!(
            (got.value() - want).abs() < 1e-12,
            "parse({input:?}) = {}, want {want}",
            got.value()
        );
    }
}

#[test]
fn fractional_parts_are_accepted() {
    let r: AspectRatio = "1.5:0.75".parse().expect("parse");
    assert!((r.value() - 2.0).abs() < 1e-12);
}

#[test]
fn negative_ratio_is_not_rejected_here() {
    let r = AspectRatio::parse("-4:3").expect("parse");
    assert!(r.value() < 0.0);
}

#[test]
fn bad_format() {
    assert!(matches!(AspectRatio::parse("12"), Err(CollageError::InvalidFormat(_))));
    assert!(matches!(AspectRatio::parse("1:2:3"), Err(CollageError::InvalidFormat(_))));
    assert!(matches!(AspectRatio::parse(""), Err(CollageError::InvalidFormat(_))));
}

#[test]
fn zero_height() {
    assert!(matches!(AspectRatio::parse("3:0"), Err(CollageError::ZeroHeight)));
    assert!(matches!(AspectRatio::parse("3:0.0"), Err(CollageError::ZeroHeight)));
}

#[test]
fn non_numeric_parts() {
    match AspectRatio::parse("a:2") {
        Err(CollageError::InvalidNumber { part, value }) => {
            assert_eq!(part, "width");
            assert_eq!(value, "a");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(matches!(
        AspectRatio::parse("2:b"),
        Err(CollageError::InvalidNumber { part: "height", .. })
    ));
}
