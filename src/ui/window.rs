use gtk4 as gtk;
use libadwaita as adw;

use gtk::gdk;
use gtk::glib;
use image::RgbaImage;

pub const WINDOW_TITLE: &str = "pinshot";

pub struct WindowComponents {
    pub window: adw::ApplicationWindow,
    pub picture: gtk::Picture,
}

/// Borderless window sized to the image, with the image stretched to fill it.
pub fn create_pin_window(app: &adw::Application, image: &RgbaImage) -> WindowComponents {
    let texture = image_to_texture(image);

    let picture = gtk::Picture::builder()
        .paintable(&texture)
        .content_fit(gtk::ContentFit::Fill)
        .can_shrink(true)
        .hexpand(true)
        .vexpand(true)
        .build();

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(WINDOW_TITLE)
        .decorated(false)
        .default_width(image.width() as i32)
        .default_height(image.height() as i32)
        .content(&picture)
        .build();

    WindowComponents { window, picture }
}

/// Convert an RGBA bitmap to a GDK texture
fn image_to_texture(image: &RgbaImage) -> gdk::MemoryTexture {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let stride = image.width() as usize * 4; // RGBA = 4 bytes per pixel

    let bytes = glib::Bytes::from(image.as_raw().as_slice());

    gdk::MemoryTexture::new(
        width,
        height,
        gdk::MemoryFormat::R8g8b8a8,
        &bytes,
        stride,
    )
}
