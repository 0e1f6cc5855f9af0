mod broken;
mod samples;
mod scenarios;
mod sections;
