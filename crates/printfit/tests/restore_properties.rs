//! Property tests: layout changes never outlive an export

use printfit::prelude::*;
use printfit::{optimize, PageSetupSnapshot};
use proptest::prelude::*;

fn orientation() -> impl Strategy<Value = OrientationChoice> {
    prop_oneof![
        Just(OrientationChoice::Auto),
        Just(OrientationChoice::Portrait),
        Just(OrientationChoice::Landscape),
    ]
}

fn settings() -> impl Strategy<Value = RenderSettings> {
    (
        orientation(),
        prop::option::of(10u16..=200),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        0.0f64..=3.0,
    )
        .prop_map(|(orientation, scale, headers, gridlines, wrap, merged, margin)| {
            let mut settings = RenderSettings::new()
                .with_orientation(orientation)
                .with_headers_footers(headers)
                .with_gridlines(gridlines)
                .with_wrap_long_text(wrap)
                .with_optimize_merged_cells(merged)
                .with_margins(Margins::uniform(margin));
            if let Some(scale) = scale {
                settings = settings.with_scale(scale);
            }
            settings
        })
}

/// A sheet with `cells` values of the given lengths, laid out row by row
fn sheet(columns: u16, lengths: &[usize], merge: bool, custom_width: Option<f64>) -> Workbook {
    let mut wb = Workbook::new();
    let ws = wb.worksheet_mut(0).unwrap();
    for (i, len) in lengths.iter().enumerate() {
        let row = (i / columns as usize) as u32;
        let col = (i % columns as usize) as u16;
        ws.set_cell_value_at(row, col, "w ".repeat(*len)).unwrap();
    }
    if merge {
        ws.merge_cells(&CellRange::from_indices(0, 0, 1, 1)).unwrap();
    }
    if let Some(width) = custom_width {
        ws.set_column_width(0, width);
    }
    ws.set_wrap_at(0, 0, true).unwrap();
    wb
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_optimize_then_restore_is_lossless(
        columns in 1u16..6,
        lengths in prop::collection::vec(0usize..400, 1..30),
        merge in any::<bool>(),
        custom_width in prop::option::of(1.0f64..60.0),
        settings in settings(),
    ) {
        let mut wb = sheet(columns, &lengths, merge, custom_width);
        let before = PageSetupSnapshot::capture(&wb, "Sheet1").unwrap();

        let analysis = analyze(&wb, "Sheet1").unwrap();
        optimize(&mut wb, "Sheet1", &settings, &analysis).unwrap();
        before.restore(&mut wb).unwrap();

        let after = PageSetupSnapshot::capture(&wb, "Sheet1").unwrap();
        prop_assert_eq!(after, before);
    }

    #[test]
    fn prop_analysis_is_deterministic(
        columns in 1u16..40,
        lengths in prop::collection::vec(0usize..300, 0..80),
    ) {
        let wb = sheet(columns, &lengths, false, None);
        let first = analyze(&wb, "Sheet1").unwrap();
        let second = analyze(&wb, "Sheet1").unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!((40..=100).contains(&first.optimal_scale_percent));
        prop_assert!(first.estimated_page_count >= 1);
        prop_assert!((0.0..=1.0).contains(&first.data_density));
    }
}
