mod common;
mod playbook;
