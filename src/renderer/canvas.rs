//! Browser canvas implementation of [`Surface`]
//!
//! Wraps a `CanvasRenderingContext2d` plus the pre-loaded sprite images.
//! Draw-call failures are ignored: a canvas 2D context does not fail these
//! operations once it exists.

use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlImageElement};

use super::{Surface, TextAlign, TextStyle};
use crate::catalog::SpriteRef;
use crate::consts::*;
use crate::sim::ItemKind;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    background: CanvasGradient,
    good_images: Vec<HtmlImageElement>,
    bad_images: Vec<HtmlImageElement>,
    player_image: HtmlImageElement,
}

impl CanvasSurface {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        good_images: Vec<HtmlImageElement>,
        bad_images: Vec<HtmlImageElement>,
        player_image: HtmlImageElement,
    ) -> Result<Self, JsValue> {
        let background = ctx.create_linear_gradient(0.0, 0.0, 0.0, BOARD_HEIGHT as f64);
        background.add_color_stop(0.0, "#87ceeb")?;
        background.add_color_stop(0.5, "#d899e5")?;
        background.add_color_stop(1.0, "#d899e5")?;

        Ok(Self {
            ctx,
            background,
            good_images,
            bad_images,
            player_image,
        })
    }

    fn image_for(&self, sprite: SpriteRef) -> Option<&HtmlImageElement> {
        match sprite.kind {
            ItemKind::Good => self.good_images.get(sprite.index),
            ItemKind::Bad => self.bad_images.get(sprite.index),
        }
    }
}

impl Surface for CanvasSurface {
    fn clear_background(&mut self) {
        self.ctx.set_fill_style_canvas_gradient(&self.background);
        self.ctx
            .fill_rect(0.0, 0.0, BOARD_WIDTH as f64, BOARD_HEIGHT as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str, alpha: f64) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
        self.ctx.restore();
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str, alpha: f64) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0));
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            x as f64,
            y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
        self.ctx.restore();
    }

    fn draw_sprite(&mut self, sprite: SpriteRef, x: f32, y: f32, w: f32, h: f32, rotation: f32) {
        let Some(image) = self.image_for(sprite) else {
            return;
        };
        self.ctx.save();
        let _ = self
            .ctx
            .translate((x + w / 2.0) as f64, (y + h / 2.0) as f64);
        let _ = self.ctx.rotate(rotation as f64);
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            (-w / 2.0) as f64,
            (-h / 2.0) as f64,
            w as f64,
            h as f64,
        );
        self.ctx.restore();
    }

    fn draw_player(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.save();
        self.ctx.set_shadow_color("#ffff00");
        self.ctx.set_shadow_blur(15.0);
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &self.player_image,
            x as f64,
            y as f64,
            w as f64,
            h as f64,
        );
        self.ctx.restore();
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.ctx.save();
        if let Some((color, blur)) = style.glow {
            self.ctx.set_shadow_color(color);
            self.ctx.set_shadow_blur(blur as f64);
        }
        self.ctx.set_font(style.font);
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        if let Some(stroke) = style.stroke {
            self.ctx.set_stroke_style_str(stroke);
            self.ctx.set_line_width(2.0);
            let _ = self.ctx.stroke_text(text, x as f64, y as f64);
        }
        self.ctx.set_fill_style_str(style.fill);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
        self.ctx.restore();
    }
}
