use std::borrow::Cow;

use ndarray::Array2;

use framegrade_core::error::FramegradeError;
use framegrade_core::frame::{GrayFrame, PixelFrame};

#[test]
fn test_gray_frame_from_interleaved() {
    let samples: Vec<u8> = (0..12).collect();
    let frame = PixelFrame::from_interleaved(3, 4, 1, &samples).unwrap();

    assert_eq!(frame.height(), 3);
    assert_eq!(frame.width(), 4);
    match &frame {
        PixelFrame::Gray(gray) => assert_eq!(gray.data[[1, 2]], 6),
        PixelFrame::Color(_) => panic!("expected a grayscale frame"),
    }
}

#[test]
fn test_color_frame_planes_from_interleaved() {
    let samples = vec![10u8, 20, 30, 40, 50, 60];
    let frame = PixelFrame::from_interleaved(1, 2, 3, &samples).unwrap();

    match &frame {
        PixelFrame::Color(color) => {
            assert_eq!(color.red[[0, 0]], 10);
            assert_eq!(color.green[[0, 0]], 20);
            assert_eq!(color.blue[[0, 0]], 30);
            assert_eq!(color.red[[0, 1]], 40);
            assert_eq!(color.green[[0, 1]], 50);
            assert_eq!(color.blue[[0, 1]], 60);
        }
        PixelFrame::Gray(_) => panic!("expected a color frame"),
    }
}

#[test]
fn test_luma_borrows_gray_without_copy() {
    let frame = PixelFrame::Gray(GrayFrame::new(Array2::from_elem((4, 4), 7u8)));
    assert!(matches!(frame.luma(), Cow::Borrowed(_)));
}

#[test]
fn test_luma_uses_bt601_weights() {
    // Pure primaries: 0.299 * 255 = 76.2, 0.587 * 255 = 149.7, 0.114 * 255 = 29.1
    let cases = [
        ([255u8, 0, 0], 76u8),
        ([0, 255, 0], 150),
        ([0, 0, 255], 29),
        ([255, 255, 255], 255),
    ];
    for (rgb, expected) in cases {
        let frame = PixelFrame::from_interleaved(1, 1, 3, &rgb).unwrap();
        let gray = frame.into_luma();
        assert_eq!(gray.data[[0, 0]], expected, "rgb {rgb:?}");
    }
}

#[test]
fn test_grayscale_reduction_is_idempotent() {
    let samples = vec![255u8, 0, 0, 0, 255, 0];
    let frame = PixelFrame::from_interleaved(1, 2, 3, &samples).unwrap();

    let once = frame.into_luma();
    let again = PixelFrame::Gray(once.clone()).into_luma();
    assert_eq!(once, again);
}

#[test]
fn test_four_channels_rejected() {
    let samples = vec![0u8; 2 * 2 * 4];
    let err = PixelFrame::from_interleaved(2, 2, 4, &samples).unwrap_err();
    assert!(matches!(err, FramegradeError::InvalidFrameShape(_)), "got: {err}");
}

#[test]
fn test_two_channels_rejected() {
    let samples = vec![0u8; 2 * 2 * 2];
    let err = PixelFrame::from_interleaved(2, 2, 2, &samples).unwrap_err();
    assert!(matches!(err, FramegradeError::InvalidFrameShape(_)));
}

#[test]
fn test_zero_dimensions_rejected() {
    let err = PixelFrame::from_interleaved(0, 4, 1, &[]).unwrap_err();
    assert!(matches!(err, FramegradeError::InvalidFrameShape(_)));

    let err = PixelFrame::from_interleaved(4, 0, 1, &[]).unwrap_err();
    assert!(matches!(err, FramegradeError::InvalidFrameShape(_)));
}

#[test]
fn test_sample_count_mismatch_rejected() {
    let samples = vec![0u8; 10];
    let err = PixelFrame::from_interleaved(3, 3, 1, &samples).unwrap_err();
    assert!(matches!(err, FramegradeError::InvalidFrameShape(_)));
}
