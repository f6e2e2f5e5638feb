//! End-to-end import scenarios, SVG text in, response envelope out.

use svg3d_contours::{
    ContourImporter, Error, ImportError, ImportResponse, ValidationError,
};

fn import(text: &str) -> svg3d_contours::Result<svg3d_contours::ContourGeometry> {
    ContourImporter::default().import_str(text)
}

fn validation_errors(text: &str) -> Vec<ValidationError> {
    match import(text) {
        Err(Error::Validation(errors)) => errors.into_vec(),
        other => panic!("expected validation errors, got {other:?}"),
    }
}

#[test]
fn test_single_rect() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
        <rect x="0" y="0" width="100" height="50"/>
    </svg>"#;
    let response = ImportResponse::from_result(&import(svg));

    assert!(response.ok);
    assert!(response.errors.is_empty());
    let meta = response.meta.unwrap();
    assert_eq!(meta.bbox.min_x, 0.0);
    assert_eq!(meta.bbox.min_y, 0.0);
    assert_eq!(meta.bbox.max_x, 100.0);
    assert_eq!(meta.bbox.max_y, 50.0);
    assert_eq!(meta.outer_area, 5000.0);
    assert_eq!(meta.holes_count, 0);

    let geometry = response.geometry.unwrap();
    assert_eq!(geometry.outer.len(), 4);
    assert_eq!(geometry.extrusion.base_depth, 35.0);
    assert_eq!(geometry.extrusion.pocket_depth, 20.0);
}

#[test]
fn test_rect_with_circle_hole() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
        <rect width="100" height="100"/>
        <circle cx="50" cy="50" r="20"/>
    </svg>"#;
    let geometry = import(svg).unwrap();

    assert_eq!(geometry.holes_count(), 1);
    assert_eq!(geometry.outer_area, 10000.0);
    // Hole keeps every sampled point except the closing duplicate.
    let hole = &geometry.holes[0];
    assert!(hole.len() >= 24);
    assert!(!hole[0].approx_eq(hole.last().unwrap()));
}

#[test]
fn test_straddling_rect_is_outside() {
    let svg = r#"<svg>
        <rect width="100" height="100"/>
        <rect x="80" y="40" width="40" height="20"/>
    </svg>"#;
    let response = ImportResponse::from_result(&import(svg));

    assert!(!response.ok);
    assert!(response.geometry.is_none());
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].contains("outside the outer contour"));
    assert_eq!(
        validation_errors(svg),
        vec![ValidationError::ContourOutsideOuter { index: 1 }]
    );
}

#[test]
fn test_markup_without_root_element() {
    let text = r#"<?xml version="1.0"?><!-- <svg> placeholder -->"#;
    assert!(matches!(
        import(text),
        Err(Error::Import(ImportError::NoRootElement))
    ));
}

#[test]
fn test_self_intersecting_only_contour() {
    // Asymmetric bowtie: the lobes differ in size so the signed area is not zero.
    let svg = r#"<svg><path d="M0 0 L20 10 L20 0 L0 20 Z"/></svg>"#;
    assert_eq!(
        validation_errors(svg),
        vec![ValidationError::SelfIntersectingContour { index: 0 }]
    );
}

#[test]
fn test_every_error_is_reported() {
    let svg = r#"<svg>
        <rect x="200" y="200" width="5" height="5"/>
        <rect width="100" height="100"/>
        <path d="M10 10 L30 20 L30 10 L10 30 Z"/>
    </svg>"#;
    let response = ImportResponse::from_result(&import(svg));
    assert!(!response.ok);
    assert_eq!(
        response.errors,
        vec![
            "Contour 2 is self-intersecting".to_string(),
            "Contour 0 lies outside the outer contour".to_string(),
        ]
    );
}

#[test]
fn test_nested_groups_and_mixed_shapes() {
    let svg = r#"<svg viewBox="-50 -50 200 200">
        <g transform="ignored">
            <ellipse cx="50" cy="50" rx="45" ry="30"/>
            <g>
                <polygon points="40,40 60,40 50,55"/>
                <path d="M20 45 q5 -10 10 0 t 0 0 z"/>
            </g>
        </g>
    </svg>"#;
    let geometry = import(svg).unwrap();
    assert_eq!(geometry.holes_count(), 2);
    // viewBox origin shifts everything by +50.
    assert!((geometry.bbox.min_x - 55.0).abs() < 1e-9);
    assert!((geometry.bbox.max_x - 145.0).abs() < 1e-9);
}

#[test]
fn test_not_svg_text() {
    let response = ImportResponse::from_result(&import("just text"));
    assert_eq!(
        response.errors,
        vec!["File does not look like an SVG document".to_string()]
    );
}

#[test]
fn test_unparsable_markup() {
    let result = import("<svg><rect width='10'</svg>");
    match result {
        Err(Error::Import(ImportError::Parse { message })) => assert!(!message.is_empty()),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_upload_with_invalid_utf8() {
    let mut bytes = br#"<svg><rect width="10" height="10"/>"#.to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b"</svg>");
    // Invalid bytes become replacement characters in text content.
    let geometry = ContourImporter::default()
        .import_upload(Some(&bytes))
        .unwrap();
    assert_eq!(geometry.outer_area, 100.0);
}
