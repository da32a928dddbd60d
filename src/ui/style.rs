use eframe::egui::{Color32, Stroke};

#[derive(Clone, Copy)]
pub struct Palette {
    pub list_fill: Color32,
    pub list_outline: Color32,
    pub item_fill: Color32,
    pub item_outline: Color32,
    pub placeholder: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub preview_fill: Color32,
}

pub fn palette() -> Palette {
    Palette {
        list_fill: Color32::from_rgb(26, 28, 30),
        list_outline: Color32::from_rgb(56, 60, 66),
        item_fill: Color32::from_rgb(42, 44, 48),
        item_outline: Color32::from_rgb(128, 128, 128),
        placeholder: Color32::from_rgb(208, 240, 255),
        text_primary: Color32::from_rgb(185, 192, 200),
        text_muted: Color32::from_rgb(140, 146, 155),
        preview_fill: Color32::from_rgba_unmultiplied(26, 39, 51, 220),
    }
}

pub fn item_stroke() -> Stroke {
    Stroke::new(1.0, palette().item_outline)
}

pub fn drag_source_stroke() -> Stroke {
    Stroke::new(1.0, Color32::from_rgb(47, 111, 177))
}
