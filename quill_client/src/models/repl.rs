use quill_client::FormState;

pub enum UserRequest {
    Generate(FormState),
    Regenerate,
}
