use gloam_layer::{ScaleFilter, ViewportGeometry};
use gloam_regions::RegionLightsConfig;
use gloam_render_raylib::DarknessTexture;
use gloam_tilemap::{RegionLights, RegionLightsCommand, Viewport};
use raylib::prelude::*;

use crate::demo_map::{DemoMap, Terrain};

const SCROLL_SPEED: f32 = 360.0;

pub struct Options {
    pub window_width: u32,
    pub window_height: u32,
    pub tile_size: u32,
    pub margin: u32,
}

pub struct App {
    map: DemoMap,
    viewport: Viewport,
    lights: RegionLights,
    texture: DarknessTexture,
    filter: ScaleFilter,
    tile_size: u32,
}

impl App {
    pub fn new(map: DemoMap, config: &RegionLightsConfig, opts: &Options) -> Self {
        let geometry = ViewportGeometry::new(
            opts.window_width,
            opts.window_height,
            opts.tile_size,
            opts.tile_size,
            opts.margin,
        );
        let (cols, rows) = geometry.buffer_dims();
        log::info!(
            "viewport {}x{} px, {} px tiles, darkness buffer {}x{}",
            geometry.width,
            geometry.height,
            geometry.tile_width,
            cols,
            rows
        );
        Self {
            map,
            viewport: Viewport::new(geometry),
            lights: RegionLights::from_config(config),
            texture: DarknessTexture::new(),
            filter: ScaleFilter::default(),
            tile_size: geometry.tile_width,
        }
    }

    fn run_command(&mut self, line: &str) {
        match RegionLightsCommand::parse(line) {
            Some(cmd) => {
                log::info!("command: {}", cmd);
                self.lights.execute(cmd);
            }
            None => log::warn!("unknown command: {}", line),
        }
    }

    fn handle_input(&mut self, rl: &RaylibHandle) {
        if rl.is_window_resized() {
            self.viewport
                .resize(rl.get_screen_width().max(1) as u32, rl.get_screen_height().max(1) as u32);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_L) {
            let line = format!("changeRegionLights {}", !self.lights.is_visible());
            self.run_command(&line);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_B) {
            self.filter = self.filter.toggled();
            log::info!("darkness filter {:?}", self.filter);
            self.lights.set_filter(self.filter);
        }

        let step = SCROLL_SPEED * rl.get_frame_time();
        let mut dx = 0.0;
        let mut dy = 0.0;
        if rl.is_key_down(KeyboardKey::KEY_LEFT) || rl.is_key_down(KeyboardKey::KEY_A) {
            dx -= step;
        }
        if rl.is_key_down(KeyboardKey::KEY_RIGHT) || rl.is_key_down(KeyboardKey::KEY_D) {
            dx += step;
        }
        if rl.is_key_down(KeyboardKey::KEY_UP) || rl.is_key_down(KeyboardKey::KEY_W) {
            dy -= step;
        }
        if rl.is_key_down(KeyboardKey::KEY_DOWN) || rl.is_key_down(KeyboardKey::KEY_S) {
            dy += step;
        }
        if dx != 0.0 || dy != 0.0 {
            self.viewport.scroll_by(dx, dy);
            self.clamp_origin();
        }
    }

    fn clamp_origin(&mut self) {
        let (mw, mh) = self.map.size();
        let (loop_x, loop_y) = self.map.loops();
        let g = self.viewport.geometry();
        let ts = self.tile_size as f32;
        let (x, y) = self.viewport.origin();
        let x = fit_axis(x, mw as f32 * ts, g.width as f32, loop_x);
        let y = fit_axis(y, mh as f32 * ts, g.height as f32, loop_y);
        self.viewport.set_origin(x, y);
    }

    fn draw_tiles(&self, d: &mut RaylibDrawHandle) {
        let ts = self.tile_size as i32;
        let (ox, oy) = self.viewport.origin();
        let g = self.viewport.geometry();
        let x0 = (ox / ts as f32).floor() as i32;
        let y0 = (oy / ts as f32).floor() as i32;
        let cols = g.width as i32 / ts + 2;
        let rows = g.height as i32 / ts + 2;
        for ty in y0..y0 + rows {
            for tx in x0..x0 + cols {
                let sx = (tx * ts) as f32 - ox;
                let sy = (ty * ts) as f32 - oy;
                let color = self.map.terrain(tx, ty).map_or(Color::new(20, 20, 24, 255), terrain_color);
                d.draw_rectangle(sx.floor() as i32, sy.floor() as i32, ts, ts, color);
            }
        }
    }

    pub fn frame(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        self.handle_input(rl);
        let repaint = self.viewport.update(&self.map, &mut self.lights);
        self.texture.sync(rl, thread, self.lights.layer());

        let fps = rl.get_fps();
        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::BLACK);
        self.draw_tiles(&mut d);
        self.texture.draw(&mut d, self.viewport.layer_origin());

        let start = self.viewport.start_tile();
        let hud = format!(
            "lights {}  filter {:?}  start ({}, {})  repainted {}  fps {}",
            if self.lights.is_visible() { "on" } else { "off" },
            self.filter,
            start.x,
            start.y,
            repaint.cells(),
            fps
        );
        d.draw_rectangle(8, 8, 620, 52, Color::new(0, 0, 0, 160));
        d.draw_text(&hud, 16, 14, 18, Color::RAYWHITE);
        d.draw_text("arrows/WASD scroll   L lights   B filter", 16, 36, 16, Color::LIGHTGRAY);
    }
}

/// Keep one origin axis in range: looping axes wrap modulo the map's pixel
/// span, others stop at the map edge.
fn fit_axis(value: f32, map_px: f32, view_px: f32, looping: bool) -> f32 {
    if looping && map_px > 0.0 {
        value.rem_euclid(map_px)
    } else {
        value.clamp(0.0, (map_px - view_px).max(0.0))
    }
}

fn terrain_color(t: Terrain) -> Color {
    match t {
        Terrain::Water => Color::new(48, 92, 168, 255),
        Terrain::Sand => Color::new(214, 196, 130, 255),
        Terrain::Grass => Color::new(86, 152, 68, 255),
        Terrain::Forest => Color::new(40, 100, 48, 255),
        Terrain::Rock => Color::new(128, 124, 120, 255),
    }
}

pub fn run(map: DemoMap, config: &RegionLightsConfig, opts: &Options) {
    let (mut rl, thread) = raylib::init()
        .size(opts.window_width as i32, opts.window_height as i32)
        .resizable()
        .title("gloam: region lights")
        .build();
    rl.set_target_fps(60);

    let mut app = App::new(map, config, opts);
    while !rl.window_should_close() {
        app.frame(&mut rl, &thread);
    }
}
