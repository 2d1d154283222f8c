pub mod badge;
pub mod cli;
pub mod font;
pub mod generate;
pub mod manifest;

/// Side lengths of the square icons in an app icon set, in ascending order.
pub const ICON_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// File name of the image for the given icon size, e.g. `64.png`.
pub fn icon_filename(size: u32) -> String {
    format!("{}.png", size)
}

/// File name of the icon set manifest.
pub const MANIFEST_FILENAME: &str = "Contents.json";
