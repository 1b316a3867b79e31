//! Form state for the login and sign-up screens
//!
//! A single [`FormState`] aggregate holds every text field, keyed by
//! [`Field`], plus the avatar slot. All text fields go through the same
//! validate-and-update path.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use derive_more::Display;
use serde::Serialize;

use super::validation::{AvatarError, validate_avatar, validate_username};

/// Which form is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Mode {
    #[default]
    #[display("Login")]
    Login,
    #[display("Sign Up")]
    SignUp,
}

impl Mode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Mode::Login => Mode::SignUp,
            Mode::SignUp => Mode::Login,
        }
    }

    /// Fields that must be non-empty before submitting in this mode
    pub fn required_fields(self) -> &'static [Field] {
        match self {
            Mode::Login => &[Field::Username, Field::Password],
            Mode::SignUp => &[Field::Name, Field::Bio, Field::Username, Field::Password],
        }
    }

    /// `autocomplete` hint for the password input
    pub fn password_autocomplete(self) -> &'static str {
        match self {
            Mode::Login => "current-password",
            Mode::SignUp => "new-password",
        }
    }

    /// Whether inline validation errors are shown in this mode.
    ///
    /// Logging in checks an existing account, so the format rule only
    /// matters when choosing a new username.
    pub fn shows_inline_errors(self) -> bool {
        matches!(self, Mode::SignUp)
    }
}

/// Text fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display("name")]
    Name,
    #[display("bio")]
    Bio,
    #[display("username")]
    Username,
    #[display("password")]
    Password,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Bio, Field::Username, Field::Password];

    fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Bio => 1,
            Field::Username => 2,
            Field::Password => 3,
        }
    }

    /// Runs this field's validator, if it has one
    fn validate(self, value: &str) -> Option<String> {
        match self {
            Field::Username => validate_username(value).error_message,
            Field::Name | Field::Bio | Field::Password => None,
        }
    }
}

/// Value and inline error of one text field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub value: String,
    pub error: Option<String>,
}

/// A file picked for the avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// `data:` URI used as the preview image source
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Avatar selection: raw file, derived preview and error
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvatarSlot {
    pub file: Option<AvatarFile>,
    pub preview: Option<String>,
    pub error: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Sign-up payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub bio: String,
    pub username: String,
    pub password: String,
    pub avatar: Option<AvatarFile>,
}

/// All form state for both modes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    fields: [FieldState; 4],
    avatar: AvatarSlot,
    /// Bumped on every avatar change; reads started under an older value are stale
    avatar_generation: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new raw value and its validation result together
    pub fn update(&mut self, field: Field, raw: impl Into<String>) {
        let value = raw.into();
        let error = field.validate(&value);
        self.fields[field.index()] = FieldState { value, error };
    }

    pub fn field(&self, field: Field) -> &FieldState {
        &self.fields[field.index()]
    }

    pub fn value(&self, field: Field) -> &str {
        &self.field(field).value
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.field(field).error.as_deref()
    }

    /// The error to display next to `field` in `mode`
    pub fn inline_error(&self, mode: Mode, field: Field) -> Option<&str> {
        if mode.shows_inline_errors() {
            self.error(field)
        } else {
            None
        }
    }

    pub fn avatar(&self) -> &AvatarSlot {
        &self.avatar
    }

    /// Handles a file selection.
    ///
    /// An accepted file replaces the previous one and its preview. A rejected
    /// file clears the slot and records the error. Any read still in flight
    /// becomes stale.
    pub fn select_avatar(&mut self, file: AvatarFile) {
        self.avatar_generation += 1;
        self.store_avatar(file);
    }

    /// Clears the slot and shows why the last selection was refused
    pub fn reject_avatar(&mut self, err: AvatarError) {
        self.avatar_generation += 1;
        self.store_rejection(err);
    }

    pub fn clear_avatar(&mut self) {
        self.avatar_generation += 1;
        self.avatar = AvatarSlot::default();
    }

    /// Starts an asynchronous file read and returns its token.
    ///
    /// The slot is cleared until the read finishes so a submission in the
    /// meantime never carries the previous file.
    pub fn begin_avatar_selection(&mut self) -> u64 {
        self.clear_avatar();
        self.avatar_generation
    }

    /// Applies the outcome of the read started with `token`.
    ///
    /// Returns `false` and leaves the slot alone when another selection,
    /// rejection or clear happened since.
    pub fn finish_avatar_selection(
        &mut self,
        token: u64,
        read: Result<AvatarFile, String>,
    ) -> bool {
        if token != self.avatar_generation {
            return false;
        }
        match read {
            Ok(file) => self.store_avatar(file),
            Err(reason) => self.store_rejection(AvatarError::Unreadable { reason }),
        }
        true
    }

    fn store_avatar(&mut self, file: AvatarFile) {
        match validate_avatar(&file.content_type, file.bytes.len()) {
            Ok(()) => {
                self.avatar = AvatarSlot {
                    preview: Some(file.data_uri()),
                    file: Some(file),
                    error: None,
                };
            }
            Err(err) => self.store_rejection(err),
        }
    }

    fn store_rejection(&mut self, err: AvatarError) {
        self.avatar = AvatarSlot {
            file: None,
            preview: None,
            error: Some(err.to_string()),
        };
    }

    /// Required fields that are still empty for `mode`
    pub fn missing_fields(&self, mode: Mode) -> Vec<Field> {
        mode.required_fields()
            .iter()
            .copied()
            .filter(|field| self.value(*field).is_empty())
            .collect()
    }

    /// Whether the form for `mode` can be submitted
    pub fn is_ready(&self, mode: Mode) -> bool {
        self.missing_fields(mode).is_empty()
            && mode
                .required_fields()
                .iter()
                .all(|field| self.error(*field).is_none())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.value(Field::Username).to_string(),
            password: self.value(Field::Password).to_string(),
        }
    }

    pub fn profile_draft(&self) -> ProfileDraft {
        ProfileDraft {
            name: self.value(Field::Name).to_string(),
            bio: self.value(Field::Bio).to_string(),
            username: self.value(Field::Username).to_string(),
            password: self.value(Field::Password).to_string(),
            avatar: self.avatar.file.clone(),
        }
    }
}
