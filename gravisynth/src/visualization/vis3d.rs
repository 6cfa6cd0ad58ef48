use bevy::audio::AddAudioSource;
use bevy::math::primitives::Sphere;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::synth::FmPatch;
use crate::configuration::config::ToyConfig;
use crate::simulation::controller::SceneController;
use crate::simulation::states::{Body, NVec3};

/// Component tagging each sphere with its body index into SceneController.scene.bodies
#[derive(Component)]
struct BodyIndex(pub usize);

/// Root node of the start-screen text, despawned on start
#[derive(Component)]
struct StartScreenUi;

#[derive(Component)]
struct OrbitCamera;

#[derive(Resource)]
struct SceneRng(StdRng);

/// Last known pointer position in window pixels, top-left origin
#[derive(Resource, Default)]
struct Pointer {
    x: f64,
    y: f64,
}

/// The FM patch, `None` when sound is switched off
#[derive(Resource)]
struct Synth(Option<FmPatch>);

#[derive(Resource)]
struct StartScreenFont(Option<String>);

const TITLE: &str = "Click to start";
const HINTS: [&str; 2] = [
    "Move the mouse to orbit the camera",
    "Up and down arrows zoom in and out",
];

/// Physics space is y-down like screen space, bevy is y-up
fn to_world(v: &NVec3) -> Vec3 {
    Vec3::new(v.x as f32, -v.y as f32, v.z as f32)
}

/// Open the window and run the toy until it is closed
pub fn run_3d(controller: SceneController, cfg: &ToyConfig) {
    let rng = match cfg.scene.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let synth = cfg.synth.enabled.then(|| FmPatch::from_config(&cfg.synth));

    App::new()
        .insert_resource(controller)
        .insert_resource(SceneRng(rng))
        .insert_resource(Pointer::default())
        .insert_resource(Synth(synth))
        .insert_resource(StartScreenFont(cfg.window.font.clone()))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_audio_source::<FmPatch>()
        .add_systems(Startup, (setup_3d, setup_start_screen))
        .add_systems(
            Update,
            (
                track_pointer,
                start_on_click.run_if(on_start_screen),
                (
                    zoom_camera,
                    orbit_camera,
                    advance_scene,
                    sync_transforms_3d,
                    draw_spin_indicators,
                    drive_synth,
                )
                    .chain()
                    .run_if(running),
            )
                .chain(),
        )
        .run();
}

fn on_start_screen(controller: Res<SceneController>) -> bool {
    !controller.is_running()
}

fn running(controller: Res<SceneController>) -> bool {
    controller.is_running()
}

/// Startup system: spawn camera and lights
fn setup_3d(mut commands: Commands, controller: Res<SceneController>) {
    let eye = Vec3::new(0.0, 0.0, controller.zoom_level as f32);
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
            ..Default::default()
        },
        OrbitCamera,
    ));

    // Dim ambient light
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(50, 50, 50),
        brightness: 400.0,
    });

    // Point light at the center plus three dim ones around it
    spawn_point_light(&mut commands, Vec3::ZERO, 125, 2.0e9);
    for p in [
        Vec3::new(300.0, 300.0, 300.0),
        Vec3::new(-300.0, 300.0, 300.0),
        Vec3::new(300.0, -300.0, 300.0),
    ] {
        spawn_point_light(&mut commands, p, 50, 8.0e8);
    }
}

fn spawn_point_light(commands: &mut Commands, at: Vec3, grey: u8, intensity: f32) {
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            color: Color::srgb_u8(grey, grey, grey),
            intensity,
            range: 5000.0,
            ..Default::default()
        },
        transform: Transform::from_translation(at),
        ..Default::default()
    });
}

fn setup_start_screen(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    font: Res<StartScreenFont>,
) {
    let font: Handle<Font> = match &font.0 {
        Some(path) => asset_server.load(path.clone()),
        None => Handle::default(), // bevy's built-in font
    };
    let style = |size: f32| TextStyle {
        font: font.clone(),
        font_size: size,
        color: Color::WHITE,
    };

    commands
        .spawn((
            NodeBundle {
                style: Style {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(16.0),
                    ..Default::default()
                },
                ..Default::default()
            },
            StartScreenUi,
        ))
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(TITLE, style(64.0)));
            for hint in HINTS {
                parent.spawn(TextBundle::from_section(hint, style(32.0)));
            }
        });
}

fn track_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<Pointer>,
    mut controller: ResMut<SceneController>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    if let Some(p) = window.cursor_position() {
        pointer.x = p.x as f64;
        pointer.y = p.y as f64;
    }

    // the start click is not a drag
    if !controller.is_running() {
        return;
    }
    if buttons.just_pressed(MouseButton::Left) {
        controller.drag.press(pointer.x, pointer.y);
    } else if buttons.pressed(MouseButton::Left) {
        controller.drag.drag_to(pointer.x, pointer.y);
    }
    if buttons.just_released(MouseButton::Left) {
        controller.drag.release();
    }
}

#[allow(clippy::too_many_arguments)]
fn start_on_click(
    mut commands: Commands,
    buttons: Res<ButtonInput<MouseButton>>,
    mut controller: ResMut<SceneController>,
    mut rng: ResMut<SceneRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut patches: ResMut<Assets<FmPatch>>,
    synth: Res<Synth>,
    ui: Query<Entity, With<StartScreenUi>>,
) {
    if !buttons.any_just_pressed([MouseButton::Left, MouseButton::Right, MouseButton::Middle]) {
        return;
    }
    if !controller.start(&mut rng.0) {
        return;
    }
    info!("scene started with {} bodies", controller.scene.len());

    for e in &ui {
        commands.entity(e).despawn_recursive();
    }

    // Spawn one sphere per body
    for (i, b) in controller.scene.bodies.iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(b.radius as f32).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: body_color(b),
                    perceptual_roughness: 0.6,
                    ..Default::default()
                }),
                transform: body_transform(b),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }

    match &synth.0 {
        Some(patch) => {
            commands.spawn(AudioSourceBundle {
                source: patches.add(patch.clone()),
                settings: FmPatch::playback_settings(),
            });
            info!("fm patch started");
        }
        None => info!("sound disabled, running silent"),
    }
}

fn zoom_camera(keys: Res<ButtonInput<KeyCode>>, mut controller: ResMut<SceneController>) {
    let zoom_in = keys.pressed(KeyCode::ArrowUp);
    let zoom_out = keys.pressed(KeyCode::ArrowDown);
    if zoom_in || zoom_out {
        controller.apply_zoom(zoom_in, zoom_out);
        debug!("zoom level {}", controller.zoom_level);
    }
}

fn orbit_camera(
    controller: Res<SceneController>,
    pointer: Res<Pointer>,
    mut on_target: Local<bool>,
    mut cameras: Query<&mut Transform, With<OrbitCamera>>,
) {
    let Some(eye) = controller.orbit_eye(pointer.x, pointer.y) else {
        // zoom 0 puts the eye on its own target
        if !*on_target {
            warn!("camera at the origin, keeping the previous view");
            *on_target = true;
        }
        return;
    };
    *on_target = false;

    let eye = to_world(&eye);
    for mut transform in &mut cameras {
        *transform = Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y);
    }
}

/// Gravity, integration and central colour for this frame
fn advance_scene(mut controller: ResMut<SceneController>) {
    controller.advance();
}

fn body_color(body: &Body) -> Color {
    let [r, g, b] = body.color.to_unit();
    Color::srgb(r, g, b)
}

fn body_transform(b: &Body) -> Transform {
    let o = b.orientation;
    Transform::from_translation(to_world(&b.position)).with_rotation(Quat::from_euler(
        EulerRot::XYZ,
        o.x as f32,
        o.y as f32,
        o.z as f32,
    ))
}

fn sync_transforms_3d(
    controller: Res<SceneController>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut query: Query<(&BodyIndex, &mut Transform, &Handle<StandardMaterial>)>,
) {
    for (BodyIndex(i), mut transform, mat_handle) in &mut query {
        if let Some(b) = controller.scene.bodies.get(*i) {
            *transform = body_transform(b);

            if let Some(mat) = materials.get_mut(mat_handle) {
                mat.base_color = body_color(b);
            }
        }
    }
}

/// Short line along each body's local X axis so the spin is visible
fn draw_spin_indicators(
    controller: Res<SceneController>,
    query: Query<(&BodyIndex, &Transform)>,
    mut gizmos: Gizmos,
) {
    for (BodyIndex(i), transform) in &query {
        if let Some(b) = controller.scene.bodies.get(*i) {
            let tip = transform.transform_point(Vec3::X * b.radius as f32);
            gizmos.line(transform.translation, tip, Color::WHITE);
        }
    }
}

fn drive_synth(
    controller: Res<SceneController>,
    synth: Res<Synth>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Some(patch) = &synth.0 else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    // minimised windows report a height of 0
    if window.height() <= 0.0 {
        return;
    }
    if let Some(settings) = controller.modulators(window.height() as f64 / 2.0) {
        patch.control.set_modulators(settings);
    }
}
