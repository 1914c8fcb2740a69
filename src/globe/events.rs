use bevy::prelude::*;

#[derive(Message)]
pub struct RegenerateGridEvent;

#[derive(Message)]
pub struct SetMoonVisibleEvent {
    pub visible: bool,
}
