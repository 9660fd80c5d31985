// Resume matching: extract resume text, fill a prompt template, ask the
// model once. Fit replies are parsed into a 0-10 score; cold emails are
// returned verbatim.

pub mod cold_email;
pub mod extract;
pub mod fit_scoring;
pub mod handlers;
pub mod prompts;
