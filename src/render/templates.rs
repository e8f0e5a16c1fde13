//! MiniJinja sources of every generated file.
//!
//! Rendered with `trim_blocks` and `lstrip_blocks` on, so block tags on their
//! own line leave no blank lines behind.

/// Collection, global and block modules.
pub const ENTITY_MODULE: &str = r#"import type { {{ config_type }} } from 'payload'
{% for line in imports %}
{{ line }}
{% endfor %}

export const {{ export_name }}: {{ config_type }} = {{ config }}
"#;

pub const ACCESS_STUB: &str = r#"import type { Access } from 'payload'

export const {{ name }}: Access = ({ req: { user } }) => {
  return Boolean(user)
}
"#;

pub const HOOK_STUB: &str = r#"import type { {{ hook_type }} } from 'payload'

export const {{ name }}: {{ hook_type }} = async (args) => {
{% if returns %}
  return args.{{ returns }}
{% endif %}
}
"#;

pub const HANDLER_STUB: &str = r#"import type { PayloadHandler } from 'payload'

export const {{ name }}: PayloadHandler = async (req) => {
  return Response.json({ ok: true, user: req.user?.id ?? null })
}
"#;

pub const PAYLOAD_CONFIG: &str = r#"import path from 'path'
import { fileURLToPath } from 'url'
import { buildConfig } from 'payload'
import { {{ db_import }} } from '{{ db_package }}'
import { lexicalEditor } from '@payloadcms/richtext-lexical'
{% for item in collections %}
import { {{ item }} } from './collections/{{ item }}'
{% endfor %}
{% for item in globals %}
import { {{ item }} } from './globals/{{ item }}'
{% endfor %}
{% for plugin in plugins %}
import { {{ plugin.import }} } from '{{ plugin.package }}'
{% endfor %}

const filename = fileURLToPath(import.meta.url)
const dirname = path.dirname(filename)

export default buildConfig({
  serverURL: process.env.SERVER_URL || '{{ server_url }}',
  admin: {
{% if auth_slug %}
    user: '{{ auth_slug }}',
{% endif %}
    importMap: {
      baseDir: path.resolve(dirname),
    },
  },
  collections: [{{ collections | join(", ") }}],
  globals: [{{ globals | join(", ") }}],
  editor: lexicalEditor(),
  secret: process.env.PAYLOAD_SECRET || '',
  typescript: {
    outputFile: path.resolve(dirname, 'payload-types.ts'),
  },
{% if database == "postgres" %}
  db: postgresAdapter({
    pool: {
      connectionString: process.env.DATABASE_URI || '',
    },
  }),
{% else %}
  db: mongooseAdapter({
    url: process.env.DATABASE_URI || '',
  }),
{% endif %}
  plugins: [
{% for plugin in plugins %}
    {{ plugin.import }}({{ plugin.options }}),
{% endfor %}
  ],
})
"#;

pub const PACKAGE_JSON: &str = r#"{
  "name": "{{ project_name }}",
  "version": "{{ version }}",
  "description": {{ description_json }},
  "private": true,
  "type": "module",
  "scripts": {
    "dev": "next dev",
    "build": "next build",
    "start": "next start",
    "generate:types": "payload generate:types",
    "payload": "payload"
  },
  "dependencies": {
    "{{ db_package }}": "{{ payload_version }}",
    "@payloadcms/next": "{{ payload_version }}",
    "@payloadcms/richtext-lexical": "{{ payload_version }}",
{% for plugin in plugins %}
    "{{ plugin.package }}": "{{ plugin.version }}",
{% endfor %}
    "graphql": "^16.8.1",
    "next": "^15.0.0",
    "payload": "{{ payload_version }}",
    "react": "^19.0.0",
    "react-dom": "^19.0.0"
  },
  "devDependencies": {
    "@types/node": "^22.5.4",
    "@types/react": "^19.0.0",
    "typescript": "^5.7.0"
  }
}
"#;

pub const ENV_TEMPLATE: &str = r#"# Copy this file to .env and fill in the values.
DATABASE_URI={{ database_uri }}
PAYLOAD_SECRET=change-me
SERVER_URL={{ server_url }}
"#;

pub const README: &str = r#"# {{ project_name }}
{% if description %}

{{ description }}
{% endif %}

A Payload project using {{ database }}.

## Getting started

{% for step in next_steps %}
{{ loop.index }}. `{{ step }}`
{% endfor %}

The admin panel is served at {{ admin_url }}.

## Layout

- `src/payload.config.ts`: project configuration
{% if collections %}
- `src/collections/`: {{ collections | join(", ") }}
{% endif %}
{% if globals %}
- `src/globals/`: {{ globals | join(", ") }}
{% endif %}
{% if blocks %}
- `src/blocks/`: {{ blocks | join(", ") }}
{% endif %}
"#;

pub const GITIGNORE: &str = r#"node_modules
.next
.env
dist
build
"#;

pub const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2022",
    "lib": ["dom", "dom.iterable", "esnext"],
    "allowJs": true,
    "skipLibCheck": true,
    "strict": true,
    "noEmit": true,
    "esModuleInterop": true,
    "module": "esnext",
    "moduleResolution": "bundler",
    "resolveJsonModule": true,
    "isolatedModules": true,
    "jsx": "preserve",
    "incremental": true,
    "plugins": [{ "name": "next" }],
    "paths": {
      "@payload-config": ["./src/payload.config.ts"]
    }
  },
  "include": ["next-env.d.ts", "**/*.ts", "**/*.tsx"],
  "exclude": ["node_modules"]
}
"#;
