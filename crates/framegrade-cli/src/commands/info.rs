use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use framegrade_core::frame::PixelFrame;
use framegrade_core::io::image_io::load_image;
use framegrade_core::io::ser::SerReader;

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER or image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    if is_ser(&args.file) {
        print_ser_info(&args.file)
    } else {
        print_image_info(&args.file)
    }
}

pub fn is_ser(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ser"))
        .unwrap_or(false)
}

fn print_ser_info(path: &Path) -> Result<()> {
    let reader = SerReader::open(path)?;
    let info = reader.source_info(path);

    println!("File:        {}", info.filename.display());
    println!("Frames:      {}", info.total_frames);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Bit depth:   {}", info.bit_depth);
    println!("Color mode:  {:?}", info.color_mode);

    if let Some(ref obs) = info.observer {
        println!("Observer:    {}", obs);
    }
    if let Some(ref tel) = info.telescope {
        println!("Telescope:   {}", tel);
    }
    if let Some(ref inst) = info.instrument {
        println!("Instrument:  {}", inst);
    }

    let frame_bytes = reader.header.frame_byte_size();
    let total_mb = (frame_bytes * info.total_frames) as f64 / (1024.0 * 1024.0);
    println!("Data size:   {:.1} MB", total_mb);

    Ok(())
}

fn print_image_info(path: &Path) -> Result<()> {
    let frame = load_image(path)?;
    let layout = match &frame {
        PixelFrame::Gray(_) => "grayscale",
        PixelFrame::Color(_) => "color (RGB)",
    };

    println!("File:        {}", path.display());
    println!("Dimensions:  {}x{}", frame.width(), frame.height());
    println!("Layout:      {}", layout);

    Ok(())
}
