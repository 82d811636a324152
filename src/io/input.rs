use std::path::Path;

use anyhow::{Context, Result};

/// Read a UTF-8 meeting transcript from a file.
pub fn load_transcript(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read transcript: {:?}", path))
}

/// Embedded five-speaker transcript used when no input file is given.
pub const SAMPLE_TRANSCRIPT: &str = r#"
Meeting Transcript: Patient-Centric Chatbot Project Kickoff
Date: April 15, 2025

Sarah (Project Manager): Good morning everyone! Thanks for joining our kickoff meeting for the new patient-centric chatbot project. Let's start with quick introductions. I'm Sarah, the project manager for this initiative.

David (UX Designer): Hi team, I'm David, the UX designer. I'll be focusing on creating intuitive conversation flows and ensuring the chatbot feels natural and empathetic when interacting with patients.

Michael (Backend Developer): Hello, I'm Michael. I'll be handling the backend integration with our patient database and electronic health records system.

Jennifer (Healthcare Specialist): Hi everyone, I'm Jennifer. As our healthcare specialist, I'll ensure all medical information provided by the chatbot is accurate and compliant with healthcare regulations.

Rachel (AI Engineer): And I'm Rachel, the AI engineer. I'll be working on the natural language processing models and training the chatbot to understand patient queries effectively.

Sarah: Great! Now let's discuss our project goals. We need to build a chatbot that can help patients schedule appointments, answer basic health questions, and provide medication reminders.

Jennifer: I think we should prioritize patient privacy. We need to ensure the chatbot is HIPAA compliant and handles sensitive information appropriately.

Michael: Absolutely. I'll need to work closely with the IT security team to implement proper encryption and data protection measures.

David: From a user experience perspective, we should make the chatbot accessible to elderly patients who might not be tech-savvy. Simple language and clear navigation options will be key.

Rachel: I agree. We should also consider implementing voice recognition for patients who have difficulty typing.

Sarah: These are all excellent points. What about our timeline? I'm thinking we should aim for a prototype in 6 weeks.

Michael: That's ambitious but doable if we focus on core functionality first. I can have the database integration ready in 3 weeks.

Rachel: I'll need at least 4 weeks to train the initial NLP models and test them with sample patient queries.

David: I can have the conversation flows and UI mockups ready in 2 weeks for everyone to review.

Jennifer: I'll need to compile a list of common patient questions and appropriate responses. That will take me about 2 weeks, and then I'll need to review all the medical content before we launch.

Sarah: Perfect. Let's also plan for a mid-project review in 3 weeks to make sure we're on track.

Jennifer: One more thing - we should consider how the chatbot will handle emergency situations. We need clear escalation paths for urgent medical concerns.

Rachel: Good point. We could implement keyword recognition for emergency terms and immediately provide contact information for emergency services.

Michael: We should also have a feature that connects patients directly to a human healthcare provider if the chatbot can't adequately address their concerns.

David: I'll make sure that option is prominently displayed in the interface.

Sarah: These are all great ideas. Let's summarize our action items before we wrap up. Rachel, can you prepare a document outlining the NLP approach and training methodology?

Rachel: Yes, I'll have that ready by the end of the week.

Sarah: Michael, please schedule a meeting with the IT security team to discuss HIPAA compliance requirements.

Michael: Will do. I'll set that up for early next week.

Sarah: Jennifer, please start compiling that list of common patient questions and appropriate responses.

Jennifer: I'll get started right away and share a draft for everyone to review.

Sarah: David, we'll need those UI mockups and conversation flows in two weeks.

David: No problem, I'll have preliminary designs ready for our next meeting.

Sarah: Excellent! I'll create a shared project timeline and send it out later today. Let's reconvene next week to check on our progress. Thank you all for your input!
"#;
