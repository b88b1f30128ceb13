//! End-to-end frame loop tests: pipelines, movement, collision events

use std::cell::RefCell;
use std::rc::Rc;

use ember2d::prelude::*;

fn step(pipeline: &mut UpdatePipeline, world: &mut World, dt: f32, total: f32) {
    let time = GameTime::from_seconds(dt, total);
    pipeline.execute(&time, world);
}

fn solid_box(world: &mut World, name: &str, x: f32, y: f32) -> Entity {
    let entity = world.spawn(name);
    world.add_component(entity, TransformComponent::from_position(Vec2::new(x, y)));
    world.add_component(
        entity,
        ColliderComponent::new(CollisionShape::new_box(10.0, 10.0)),
    );
    entity
}

#[test]
fn overlap_produces_enter_on_both_sides_then_exit_after_separation() {
    let mut world = World::new();
    let a = solid_box(&mut world, "a", 0.0, 0.0);
    let b = solid_box(&mut world, "b", 5.0, 5.0);

    let events: Rc<RefCell<Vec<(Entity, CollisionEventKind)>>> = Rc::new(RefCell::new(Vec::new()));
    for entity in [a, b] {
        let events = Rc::clone(&events);
        world
            .get_component_mut::<ColliderComponent>(entity)
            .unwrap()
            .on_collision(Box::new(move |_, event| {
                events.borrow_mut().push((event.entity, event.kind));
            }));
    }

    let config = EngineConfig::default();
    let mut pipeline = UpdatePipeline::new();
    pipeline.add_system(Box::new(PhysicsSystem::new(&config)));

    step(&mut pipeline, &mut world, 1.0 / 60.0, 0.0);
    {
        let seen = events.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&(a, CollisionEventKind::Enter)));
        assert!(seen.contains(&(b, CollisionEventKind::Enter)));
    }

    // Still overlapping: no new edges.
    events.borrow_mut().clear();
    step(&mut pipeline, &mut world, 1.0 / 60.0, 1.0 / 60.0);
    assert!(events.borrow().is_empty());

    // Separate B far away; both sides observe the exit.
    world
        .get_component_mut::<TransformComponent>(b)
        .unwrap()
        .position = Vec2::new(100.0, 100.0);
    step(&mut pipeline, &mut world, 1.0 / 60.0, 2.0 / 60.0);
    let seen = events.borrow();
    assert_eq!(seen.len(), 2);
    assert!(seen.contains(&(a, CollisionEventKind::Exit)));
    assert!(seen.contains(&(b, CollisionEventKind::Exit)));
}

#[test]
fn registration_order_does_not_leak_into_execution_order() {
    struct Tagger {
        name: &'static str,
        order: i32,
        log: Rc<RefCell<Vec<&'static str>>>,
    }
    impl UpdateSystem for Tagger {
        fn name(&self) -> &str {
            self.name
        }
        fn update_order(&self) -> i32 {
            self.order
        }
        fn update(&mut self, _: &GameTime, _: &mut World, _: &mut UpdateCommands) {
            self.log.borrow_mut().push(self.name);
        }
    }

    let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
    let mut pipeline = UpdatePipeline::new();
    for (name, order) in [("audio", 400), ("physics", 200), ("ai", 50)] {
        pipeline.add_system(Box::new(Tagger {
            name,
            order,
            log: Rc::clone(&log),
        }));
    }

    let mut world = World::new();
    step(&mut pipeline, &mut world, 1.0 / 60.0, 0.0);
    assert_eq!(*log.borrow(), vec!["ai", "physics", "audio"]);
}

#[test]
fn moving_entity_collides_with_a_stationary_one() {
    let mut world = World::new();
    let wall = solid_box(&mut world, "wall", 50.0, 0.0);
    let mover = solid_box(&mut world, "mover", 0.0, 0.0);
    world.add_component(mover, VelocityComponent::linear(10.0, 0.0));

    let hits: Rc<RefCell<Vec<Entity>>> = Rc::default();
    {
        let hits = Rc::clone(&hits);
        world
            .get_component_mut::<ColliderComponent>(mover)
            .unwrap()
            .on_collision(Box::new(move |_, event| {
                if event.kind == CollisionEventKind::Enter {
                    hits.borrow_mut().push(event.other);
                }
            }));
    }

    let config = EngineConfig::default();
    let mut pipeline = UpdatePipeline::new();
    // Registered physics-first; ordering still integrates before detecting.
    pipeline.add_system(Box::new(PhysicsSystem::new(&config)));
    pipeline.add_system(Box::new(MovementSystem::new(&config)));

    // 10 units/s for 4 seconds closes the 40-unit gap between box edges.
    let mut total = 0.0;
    for _ in 0..5 {
        step(&mut pipeline, &mut world, 1.0, total);
        total += 1.0;
    }

    assert_eq!(*hits.borrow(), vec![wall]);
    assert!(world
        .get_component::<ColliderComponent>(mover)
        .unwrap()
        .is_touching());
}

#[test]
fn destroyed_entities_disappear_at_the_frame_boundary() {
    let mut world = World::new();
    let doomed = world.spawn("doomed");
    world.add_component(doomed, LifetimeComponent::seconds(0.5));

    let mut pipeline = UpdatePipeline::new();
    pipeline.add_system(Box::new(LifetimeSystem::default()));

    step(&mut pipeline, &mut world, 0.3, 0.0);
    assert!(world.is_alive(doomed));

    // Pipeline runs maintain() after the frame, so death is visible here.
    step(&mut pipeline, &mut world, 0.3, 0.3);
    assert!(!world.is_alive(doomed));
}

#[test]
fn render_pipeline_draws_contact_state() {
    #[derive(Default)]
    struct RecordingRenderer {
        strokes: Vec<Color>,
    }
    impl Renderer for RecordingRenderer {
        fn fill_rect(&mut self, _: Vec2, _: f32, _: f32, _: Color) {}
        fn stroke_rect(&mut self, _: Vec2, _: f32, _: f32, color: Color) {
            self.strokes.push(color);
        }
        fn fill_circle(&mut self, _: Vec2, _: f32, _: Color) {}
        fn stroke_circle(&mut self, _: Vec2, _: f32, color: Color) {
            self.strokes.push(color);
        }
        fn draw_line(&mut self, _: Vec2, _: Vec2, _: Color) {}
        fn draw_text(&mut self, _: Vec2, _: &str, _: Color) {}
    }

    let mut world = World::new();
    solid_box(&mut world, "a", 0.0, 0.0);
    solid_box(&mut world, "b", 5.0, 5.0);

    let config = EngineConfig::default();
    let mut update = UpdatePipeline::new();
    update.add_system(Box::new(PhysicsSystem::new(&config)));
    step(&mut update, &mut world, 1.0 / 60.0, 0.0);

    let mut render = RenderPipeline::new();
    render.add_system(Box::new(
        ember2d::render::CollisionDebugRenderSystem::default(),
    ));
    let mut renderer = RecordingRenderer::default();
    render.execute(&world, &mut renderer);

    assert_eq!(renderer.strokes.len(), 2);
    for color in renderer.strokes {
        assert_eq!(color, Color::RED);
    }
}
