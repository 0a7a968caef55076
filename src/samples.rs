//! Tutorials a fresh session starts with.
use crate::Tutorial;

const SUPABASE_AUTH_CONTENT: &str = r#"# Supabase Auth Setup

Step-by-step guide to setting up Supabase authentication in React.

## Installation

First, install the Supabase client:

```bash
npm install @supabase/supabase-js
```

## Configuration

Create your Supabase client:

```javascript
// Install first: npm install @supabase/supabase-js
import { createClient } from '@supabase/supabase-js'

const supabaseUrl = 'YOUR_SUPABASE_URL'
const supabaseKey = 'YOUR_SUPABASE_ANON_KEY'

export const supabase = createClient(supabaseUrl, supabaseKey)
```

## Sign Up Function

```javascript
const signUp = async (email, password) => {
  const { user, error } = await supabase.auth.signUp({
    email: email,
    password: password,
  });
  if (error) console.error('Error:', error);
  return { user, error };
};
```

## Login Function

```javascript
const login = async (email, password) => {
  const { session, error } = await supabase.auth.signInWithPassword({
    email: email,
    password: password,
  });
  if (error) console.error('Error:', error);
  return { session, error };
};
```"#;

const REACT_HOOKS_CONTENT: &str = r#"# React Hooks Best Practices

Learn the essential patterns for effective hook usage.

## useState Best Practices

```javascript
// ✅ Good: Single responsibility
const [name, setName] = useState('');
const [email, setEmail] = useState('');

// ❌ Avoid: Complex objects when not needed
const [user, setUser] = useState({ name: '', email: '' });
```

## useEffect Dependencies

```javascript
// ✅ Good: Include all dependencies
useEffect(() => {
  fetchUser(userId);
}, [userId]);

// ❌ Bad: Missing dependencies
useEffect(() => {
  fetchUser(userId);
}, []); // userId missing!
```"#;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The sample catalogue, ids 1 and 2
pub fn sample_tutorials() -> Vec<Tutorial> {
    vec![
        Tutorial {
            id: 1,
            title: "Supabase Auth Setup".to_string(),
            tags: strings(&["Supabase", "Auth", "React"]),
            date: "Sept 21, 2025".to_string(),
            summary: "Step-by-step guide to setting up Supabase authentication in React. \
                      Includes signup, login, and session handling."
                .to_string(),
            content: SUPABASE_AUTH_CONTENT.to_string(),
            project_link: Some("https://github.com/example/supabase-auth".to_string()),
            favorite: true,
        },
        Tutorial {
            id: 2,
            title: "React Hooks Best Practices".to_string(),
            tags: strings(&["React", "Hooks", "JavaScript"]),
            date: "Sept 20, 2025".to_string(),
            summary: "Essential patterns and best practices for using React hooks effectively \
                      in your applications."
                .to_string(),
            content: REACT_HOOKS_CONTENT.to_string(),
            project_link: None,
            favorite: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract_code_blocks;

    #[test]
    fn test_sample_code_blocks() {
        let samples = sample_tutorials();
        let supabase = extract_code_blocks(&samples[0].content);
        assert_eq!(supabase.len(), 4);
        assert_eq!(supabase[0].language, "bash");
        assert_eq!(supabase[0].code, "npm install @supabase/supabase-js");

        let hooks = extract_code_blocks(&samples[1].content);
        assert_eq!(hooks.len(), 2);
        assert!(hooks.iter().all(|b| b.language == "javascript"));
    }
}
