mod dumbbell_layout;
mod dumbbell_topology;
