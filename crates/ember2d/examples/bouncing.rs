//! Bouncing balls in a walled arena, rendered as ASCII to the terminal
//!
//! Demonstrates the full frame skeleton: a host-owned timer, the update
//! pipeline (movement + physics + lifetime), collision handlers reacting to
//! enter events, and a render pipeline over a host-implemented `Renderer`.
//!
//! Run with `RUST_LOG=debug cargo run --example bouncing` to watch the
//! collision edges in the log.

use std::thread::sleep;
use std::time::Duration;

use ember2d::prelude::*;
use ember2d::render::CollisionDebugRenderSystem;

const ARENA_W: f32 = 78.0;
const ARENA_H: f32 = 22.0;

/// Renders world-space shapes into a character grid and prints it
struct AsciiRenderer {
    cells: Vec<char>,
}

impl AsciiRenderer {
    fn new() -> Self {
        Self {
            cells: vec![' '; (ARENA_W as usize + 1) * (ARENA_H as usize + 1)],
        }
    }

    fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn plot(&mut self, x: f32, y: f32, glyph: char) {
        if x < 0.0 || y < 0.0 || x > ARENA_W || y > ARENA_H {
            return;
        }
        let idx = y as usize * (ARENA_W as usize + 1) + x as usize;
        self.cells[idx] = glyph;
    }

    fn present(&self) {
        // Clear screen and home the cursor.
        print!("\x1b[2J\x1b[H");
        for row in self.cells.chunks(ARENA_W as usize + 1) {
            let line: String = row.iter().collect();
            println!("{line}");
        }
    }
}

impl Renderer for AsciiRenderer {
    fn fill_rect(&mut self, center: Vec2, width: f32, height: f32, _: Color) {
        self.stroke_rect(center, width, height, Color::WHITE);
    }

    fn stroke_rect(&mut self, center: Vec2, width: f32, height: f32, _: Color) {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let mut x = center.x - hw;
        while x <= center.x + hw {
            self.plot(x, center.y - hh, '#');
            self.plot(x, center.y + hh, '#');
            x += 1.0;
        }
        let mut y = center.y - hh;
        while y <= center.y + hh {
            self.plot(center.x - hw, y, '#');
            self.plot(center.x + hw, y, '#');
            y += 1.0;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.stroke_circle(center, radius, color);
        self.plot(center.x, center.y, 'o');
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, _: Color) {
        let steps = (radius * 8.0).max(8.0) as usize;
        for i in 0..steps {
            let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
            self.plot(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin() * 0.5, // terminal cells are tall
                '.',
            );
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, _: Color) {
        let steps = (to - from).norm().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let p = from + (to - from) * t;
            self.plot(p.x, p.y, '*');
        }
    }

    fn draw_text(&mut self, position: Vec2, text: &str, _: Color) {
        for (i, glyph) in text.chars().enumerate() {
            self.plot(position.x + i as f32, position.y, glyph);
        }
    }
}

fn spawn_wall(world: &mut World, name: &str, x: f32, y: f32, w: f32, h: f32) {
    let wall = world.spawn(name);
    world.add_component(wall, TransformComponent::from_position(Vec2::new(x, y)));
    // Walls never observe anything themselves; the balls do the watching.
    world.add_component(
        wall,
        ColliderComponent::new(CollisionShape::new_box(w, h))
            .with_layers(CollisionLayer::ENVIRONMENT, CollisionLayer::empty()),
    );
}

fn spawn_ball(world: &mut World, name: &str, position: Vec2, velocity: Vec2) {
    let ball = world.spawn(name);
    world.add_component(ball, TransformComponent::from_position(position));
    world.add_component(ball, VelocityComponent::linear(velocity.x, velocity.y));
    world.add_component(
        ball,
        ColliderComponent::new(CollisionShape::new_circle(1.5))
            .with_layers(CollisionLayer::DEBRIS, CollisionLayer::ENVIRONMENT),
    );

    // Bounce off whatever we just entered by reflecting velocity away from it.
    world
        .get_component_mut::<ColliderComponent>(ball)
        .unwrap()
        .on_collision(Box::new(move |world, event| {
            if event.kind != CollisionEventKind::Enter
                && event.kind != CollisionEventKind::TriggerEnter
            {
                return;
            }
            let Some(wall_pos) = world_transform(world, event.other).map(|t| t.position) else {
                return;
            };
            let Some(my_pos) = world_transform(world, event.entity).map(|t| t.position) else {
                return;
            };
            let away = my_pos - wall_pos;
            if let Some(velocity) = world.get_component_mut::<VelocityComponent>(event.entity) {
                // Reflect along the dominant axis of separation.
                if away.x.abs() > away.y.abs() {
                    velocity.linear.x = velocity.linear.x.abs() * away.x.signum();
                } else {
                    velocity.linear.y = velocity.linear.y.abs() * away.y.signum();
                }
            }
        }));
}

fn main() {
    env_logger::init();

    let config = EngineConfig::default();
    let mut world = World::new();

    spawn_wall(&mut world, "wall_top", ARENA_W / 2.0, 0.0, ARENA_W, 2.0);
    spawn_wall(&mut world, "wall_bottom", ARENA_W / 2.0, ARENA_H, ARENA_W, 2.0);
    spawn_wall(&mut world, "wall_left", 0.0, ARENA_H / 2.0, 2.0, ARENA_H);
    spawn_wall(&mut world, "wall_right", ARENA_W, ARENA_H / 2.0, 2.0, ARENA_H);

    spawn_ball(&mut world, "ball_a", Vec2::new(20.0, 8.0), Vec2::new(14.0, 6.0));
    spawn_ball(&mut world, "ball_b", Vec2::new(50.0, 14.0), Vec2::new(-10.0, -8.0));
    spawn_ball(&mut world, "ball_c", Vec2::new(39.0, 11.0), Vec2::new(7.0, -11.0));

    let mut update = UpdatePipeline::new();
    update.add_system(Box::new(MovementSystem::new(&config)));
    update.add_system(Box::new(PhysicsSystem::new(&config)));
    update.add_system(Box::new(LifetimeSystem::default()));

    let mut render = RenderPipeline::new();
    render.add_system(Box::new(CollisionDebugRenderSystem::new()));

    let mut renderer = AsciiRenderer::new();
    let mut timer = Timer::new();

    // ~20 seconds at 30 fps, then exit.
    for _ in 0..600 {
        let time = timer.tick();
        update.execute(&time, &mut world);

        renderer.clear();
        render.execute(&world, &mut renderer);
        renderer.present();

        sleep(Duration::from_millis(33));
    }
}
