use argh::FromArgs;
use std::path::PathBuf;

use tinct::image::{Image, ImageSize, PixelFormat, Rect};
use tinct::io::{functional as F, ReadConversion, WriteConversion};
use tinct::pixel::{Hsv, Pixel, Pixel8, PixelF};

#[derive(FromArgs)]
/// Compose a test card, optionally over a PNG background, and write it as PNG
struct Args {
    /// path to the output PNG
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// optional background PNG
    #[argh(option, short = 'b')]
    background: Option<PathBuf>,

    /// optional PNG blended over the center of the canvas
    #[argh(option)]
    overlay: Option<PathBuf>,

    /// pixel format to compose in (GA8, GA16, GAF, RGBA8, RGBA16, RGBAF)
    #[argh(option, short = 'f', default = "PixelFormat::RgbaF")]
    format: PixelFormat,

    /// width of the generated canvas
    #[argh(option, default = "320")]
    width: usize,

    /// height of the generated canvas
    #[argh(option, default = "240")]
    height: usize,

    /// transparent border added around the canvas
    #[argh(option, default = "8")]
    margin: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // start from the background or a vertical gradient
    let mut canvas = match &args.background {
        Some(path) => F::read_image(path, ReadConversion::Format(args.format))?,
        None => gradient(
            ImageSize {
                width: args.width,
                height: args.height,
            },
            args.format,
        ),
    };
    log::info!("composing on a {} {} canvas", canvas.size(), canvas.pixel_format());

    // a hue sweep along the top
    let strip = (canvas.height() / 8).max(1) as i64;
    for x in 0..canvas.width() as i64 {
        let hue = Hsv {
            h: x as f32 / canvas.width() as f32,
            s: 0.9,
            v: 1.0,
            a: 0.8,
        };
        canvas.draw_vert_line(x, 0, strip, PixelF::from_color(hue));
    }

    // translucent panels and their outlines
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let panel = Rect::new(w / 8, h / 4, w / 2, h / 2);
    canvas.draw_rect(panel, Pixel8::new(177, 122, 21, 150), true);
    canvas.draw_rect(panel, Pixel8::new(0, 0, 0, 200), false);
    let mirrored = Rect::new(w - w / 8, h - h / 8, -w / 2, -h / 2);
    canvas.draw_rect(mirrored, Pixel8::new(62, 150, 200, 160), true);
    canvas.draw_rect(mirrored, Pixel8::new(255, 255, 255, 220), false);

    if let Some(path) = &args.overlay {
        let overlay = F::read_image(path, ReadConversion::ClosestMatch)?;
        let x = (w - overlay.width() as i64) / 2;
        let y = (h - overlay.height() as i64) / 2;
        log::info!("blending {} overlay at ({x}, {y})", overlay.size());
        canvas.draw_image(x, y, &overlay);
    }

    let margin = args.margin as i64;
    canvas.resize_canvas(
        -margin,
        -margin,
        ImageSize {
            width: canvas.width() + 2 * args.margin,
            height: canvas.height() + 2 * args.margin,
        },
    );

    let conversion = if args.background.is_some() {
        WriteConversion::OriginalFileFormat
    } else {
        WriteConversion::ClosestMatch
    };
    F::write_image(&args.output, &canvas, conversion)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}

fn gradient(size: ImageSize, format: PixelFormat) -> Image {
    let top = PixelF::new(0.1, 0.1, 0.3, 1.0);
    let bottom = PixelF::new(0.9, 0.6, 0.2, 1.0);
    let mut image = Image::with_format(size, format);
    let last = size.height.saturating_sub(1).max(1) as f32;
    for y in 0..size.height {
        let color: Pixel<f32> = top.interpolated(bottom, y as f32 / last);
        image.put_hor_line(0, y as i64, size.width as i64, color);
    }
    image
}
