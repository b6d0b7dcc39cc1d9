#[cfg(test)]
pub const POST_DATA: &str = r#"---
title: "GPT-5 Launch"
date: 2025-04-03
tags: [ai, openai]
---

# GPT-5 Launch

The model is out.

<Copy text="pip install openai" />
"#;

#[cfg(test)]
pub const NO_HEADER_POST: &str = "# Robotics Update\n\nNo header in this one.\n";

#[cfg(test)]
pub const BAD_DATE_POST: &str = r#"---
title: "Bad date"
date: "not-a-date"
---
body
"#;
