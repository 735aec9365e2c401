use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Component)]
pub struct DropzoneHint;

#[derive(Component)]
pub struct LoadingIndicator;

#[derive(Component)]
pub struct ProgressBar;

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct FpsText;

/// User-facing notice for rejections and failures. Cleared when a new load
/// begins; synced to the overlay status line when it changes.
#[derive(Resource, Default)]
pub struct StatusNotice(pub String);

pub fn spawn_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            // Dropzone hint, shown until the first load begins.
            parent.spawn((
                Text::new("Drop a .glb file anywhere in the window"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.35, 0.35, 0.35)),
                TextLayout::new_with_justify(JustifyText::Center),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Percent(46.0),
                    width: Val::Percent(100.0),
                    ..default()
                },
                DropzoneHint,
            ));

            // Loading indicator with a proportional progress bar.
            parent
                .spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Percent(46.0),
                        left: Val::Percent(35.0),
                        width: Val::Percent(30.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(10.0),
                        display: Display::None,
                        ..default()
                    },
                    LoadingIndicator,
                ))
                .with_children(|indicator| {
                    indicator.spawn((
                        Text::new("Loading…"),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.35, 0.35, 0.35)),
                    ));
                    indicator
                        .spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Px(6.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.85, 0.85, 0.85)),
                        ))
                        .with_children(|track| {
                            track.spawn((
                                Node {
                                    width: Val::Percent(0.0),
                                    height: Val::Percent(100.0),
                                    ..default()
                                },
                                BackgroundColor(Color::srgb(0.25, 0.5, 0.9)),
                                ProgressBar,
                            ));
                        });
                });

            // Status line for rejection/failure notices.
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.2, 0.2)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));

            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.5, 0.5)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

/// Entering `Loading`: show the indicator, hide the dropzone hint (a no-op
/// on repeat loads), reset the bar and clear any stale notice.
pub fn show_loading_overlay(
    mut progress: ResMut<LoadingProgress>,
    mut notice: ResMut<StatusNotice>,
    mut indicator: Query<&mut Node, (With<LoadingIndicator>, Without<DropzoneHint>)>,
    mut hint: Query<&mut Node, (With<DropzoneHint>, Without<LoadingIndicator>)>,
) {
    progress.fraction = 0.0;
    notice.0.clear();

    for mut node in &mut indicator {
        node.display = Display::Flex;
    }
    for mut node in &mut hint {
        node.display = Display::None;
    }
}

/// Leaving `Loading` (either outcome): hide the indicator.
pub fn hide_loading_overlay(
    mut indicator: Query<&mut Node, With<LoadingIndicator>>,
) {
    for mut node in &mut indicator {
        node.display = Display::None;
    }
}

/// Mirror the latest progress fraction into the bar width.
pub fn update_progress_bar(
    progress: Res<LoadingProgress>,
    mut bar: Query<&mut Node, With<ProgressBar>>,
) {
    for mut node in &mut bar {
        node.width = Val::Percent((progress.fraction * 100.0).clamp(0.0, 100.0));
    }
}

/// Push notice changes to the status line.
pub fn sync_status_notice(
    notice: Res<StatusNotice>,
    mut status: Query<&mut Text, With<StatusText>>,
) {
    if !notice.is_changed() {
        return;
    }
    for mut text in &mut status {
        text.0 = notice.0.clone();
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}
