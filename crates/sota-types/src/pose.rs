//! Constructors for poses, LED states, and speech settings.

use crate::robotlib::{Color, LedState, Pose, Servo, ServoId};
use crate::sotatalk::{RecognitionResult, Sentence, SpeechConfig};

/// Brightest mouth LED value. The mouth LED level is one byte (0..=255).
pub const MOUTH_FULL_BRIGHTNESS: i32 = 255;

impl Servo {
    /// Servo setpoint; `angle` is in tenths of a degree.
    pub fn new(id: ServoId, angle: i32) -> Self {
        Self {
            id: id as i32,
            angle,
        }
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }
}

impl LedState {
    /// Same color on both eyes and the power button.
    pub fn uniform(color: Color, mouth: i32) -> Self {
        Self {
            left_eye: Some(color.clone()),
            right_eye: Some(color.clone()),
            mouth,
            power_button: Some(color),
        }
    }
}

impl Pose {
    /// Pose built from `(servo, angle)` pairs, in the given order.
    pub fn from_angles<I>(angles: I) -> Self
    where
        I: IntoIterator<Item = (ServoId, i32)>,
    {
        Self {
            servos: angles
                .into_iter()
                .map(|(id, angle)| Servo::new(id, angle))
                .collect(),
            led: None,
        }
    }

    pub fn with_led(mut self, led: LedState) -> Self {
        self.led = Some(led);
        self
    }

    /// Angle set for `id`, if the pose addresses that servo.
    pub fn angle_of(&self, id: ServoId) -> Option<i32> {
        self.servos
            .iter()
            .find(|s| s.id == id as i32)
            .map(|s| s.angle)
    }
}

impl SpeechConfig {
    pub fn new(pitch: i32, intonation: i32, speech_rate: i32) -> Self {
        Self {
            pitch,
            intonation,
            speech_rate,
        }
    }
}

impl Sentence {
    /// Sentence text: first label of every word, concatenated.
    pub fn text(&self) -> String {
        self.word_list
            .iter()
            .filter_map(|w| w.labels.first())
            .map(String::as_str)
            .collect()
    }
}

impl RecognitionResult {
    /// Candidate sentences in server order.
    pub fn candidates(&self) -> Vec<String> {
        self.sentence_list.iter().map(Sentence::text).collect()
    }
}
